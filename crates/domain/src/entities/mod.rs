//! Domain entities - Objects decoded from the Navitia API

mod display;
mod journey;
mod mode;
mod place;
mod pt_object;
mod region;
mod section;

pub use display::{DisplayInformation, Equipment};
pub use journey::{Co2Emission, Journey};
pub use mode::{CommercialMode, Mode, NormalizedPhysicalMode, PhysicalMode};
pub use place::{
    Address, AdministrativeRegion, Container, EmbeddedType, Place, Poi, PoiType, StopArea,
    StopPoint,
};
pub use pt_object::{Collection, Company, Line, Network, PtObject, Route};
pub use region::Region;
pub use section::{PathSegment, PtMethod, Section, SectionType, StopTime};
