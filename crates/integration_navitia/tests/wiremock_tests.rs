//! Integration tests for the Navitia session (wiremock-based)

use std::time::Duration;

use chrono::NaiveDate;
use domain::entities::{Collection, Container, EmbeddedType, PtObject};
use domain::value_objects::{Coordinates, Id};
use integration_navitia::{
    CancellationToken, ExploreRequest, JourneyRequest, NavitiaConfig, NavitiaError,
    PlacesRequest, RegionRequest, Session, TransitApi,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for_mock(base_url: &str) -> NavitiaConfig {
    NavitiaConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        cache_ttl_minutes: 0,
        ..NavitiaConfig::with_api_key("abc")
    }
}

fn session_for_mock(server: &MockServer) -> Session {
    Session::new(&config_for_mock(&server.uri())).unwrap()
}

const fn sample_regions_json() -> &'static str {
    r#"{
        "regions": [{
            "id": "fr-idf",
            "name": "Île-de-France",
            "status": "running",
            "shape": "MULTIPOLYGON(((1.4 48.1,3.6 48.1,3.6 49.3,1.4 49.3,1.4 48.1)))",
            "dataset_created_at": "20170915T120312",
            "last_load_at": "20170916T030000",
            "start_production_date": "20170901",
            "end_production_date": "20180101",
            "error": {"code": "", "value": ""}
        }],
        "pagination": {"start_page": 0, "items_on_page": 1, "items_per_page": 25, "total_result": 1}
    }"#
}

const fn sample_journeys_json() -> &'static str {
    r#"{
        "journeys": [{
            "duration": 1740,
            "nb_transfers": 0,
            "departure_date_time": "20171001T080000",
            "arrival_date_time": "20171001T082900",
            "requested_date_time": "20171001T080000",
            "type": "best",
            "status": "",
            "sections": [
                {"type": "street_network", "mode": "walking", "duration": 240,
                 "departure_date_time": "20171001T080000", "arrival_date_time": "20171001T080400",
                 "from": {"id": "2.37;48.84", "name": "20 Rue de Bercy"},
                 "to": {"id": "stop_point:OIF:SP:1", "name": "Gare de Lyon",
                        "embedded_type": "stop_point",
                        "stop_point": {"id": "stop_point:OIF:SP:1", "name": "Gare de Lyon"}}},
                {"type": "public_transport", "duration": 1500,
                 "departure_date_time": "20171001T080400", "arrival_date_time": "20171001T082900",
                 "display_informations": {"label": "A", "commercial_mode": "RER", "color": "E2231A"},
                 "from": {"id": "stop_point:OIF:SP:1", "name": "Gare de Lyon"},
                 "to": {"id": "stop_point:OIF:SP:2", "name": "La Défense"}}
            ]
        }]
    }"#
}

const fn sample_places_json() -> &'static str {
    r#"{
        "places": [
            {"id": "stop_area:OIF:SA:8768600", "name": "Gare de Lyon (Paris)", "quality": 90,
             "embedded_type": "stop_area",
             "stop_area": {"id": "stop_area:OIF:SA:8768600", "name": "Gare de Lyon",
                           "coord": {"lon": "2.373481", "lat": "48.844945"}}},
            {"id": "admin:fr:75056", "name": "Paris", "quality": 70,
             "embedded_type": "administrative_region",
             "administrative_region": {"id": "admin:fr:75056", "name": "Paris", "level": 8}}
        ]
    }"#
}

fn date() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, 10, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

// ============================================================================
// Coverage
// ============================================================================

#[tokio::test]
async fn test_regions_success_with_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage"))
        .and(header("authorization", "Basic YWJjOg=="))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_regions_json()))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let results = session.regions(&RegionRequest::default()).await.unwrap();

    assert_eq!(results.len(), 1);
    let region = results.first().unwrap();
    assert_eq!(region.id.as_str(), "fr-idf");
    assert!(region.is_running());
    assert!(region.contains(&Coordinates::new_unchecked(2.35, 48.85)));
    assert_eq!(results.paging.total_results, 1);
    assert_eq!(results.info.url.path(), "/coverage");
    assert!(results.info.url.query().is_none());
}

#[tokio::test]
async fn test_regions_request_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage"))
        .and(query_param("count", "2"))
        .and(query_param("disable_geojson", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"regions": []}"#))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let request = RegionRequest {
        count: 2,
        geo: false,
    };
    let results = session.regions(&request).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_region_by_pos_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage/2.352222;48.856614"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_regions_json()))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let coords = Coordinates::new(2.352_222, 48.856_614).unwrap();
    let results = session.region_by_pos(&coords).await.unwrap();
    assert_eq!(results.first().unwrap().name, "Île-de-France");
}

#[tokio::test]
async fn test_region_by_id_is_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage/fr-idf"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_regions_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NavitiaConfig {
        cache_ttl_minutes: 5,
        ..config_for_mock(&server.uri())
    };
    let session = Session::new(&config).unwrap();
    let id = Id::new("fr-idf");

    let first = session.region_by_id(&id).await.unwrap();
    let second = session.region_by_id(&id).await.unwrap();
    assert_eq!(first.regions, second.regions);
}

#[tokio::test]
async fn test_region_by_id_without_cache_hits_server_each_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage/fr-idf"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_regions_json()))
        .expect(2)
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let id = Id::new("fr-idf");
    session.region_by_id(&id).await.unwrap();
    session.region_by_id(&id).await.unwrap();
}

// ============================================================================
// Journeys
// ============================================================================

#[tokio::test]
async fn test_journeys_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/journeys"))
        .and(query_param("from", "2.370000;48.840000"))
        .and(query_param("to", "stop_area:OIF:SA:8768600"))
        .and(query_param("datetime", "20171001T080000"))
        .and(query_param("first_section_mode[]", "walking"))
        .and(query_param("first_section_mode[]", "bike"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_journeys_json()))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let from = Coordinates::new_unchecked(2.37, 48.84);
    let to = Id::new("stop_area:OIF:SA:8768600");
    let request = JourneyRequest {
        first_section_modes: vec![
            domain::entities::Mode::Walking,
            domain::entities::Mode::Bike,
        ],
        count: 1,
        ..JourneyRequest::between(&from, &to).departing_at(date())
    };

    let results = session.journeys(&request).await.unwrap();
    assert_eq!(results.journeys.len(), 1);

    let journey = &results.journeys[0];
    assert_eq!(journey.duration_minutes(), 29);
    assert_eq!(journey.sections.len(), 2);
    assert_eq!(journey.public_transport_sections().count(), 1);
    assert!(journey.format_summary().contains('A'));

    let stop = journey.sections[0].to.as_ref().unwrap();
    assert_eq!(
        stop.place().unwrap().unwrap().kind(),
        EmbeddedType::StopPoint
    );
    assert!(results.to_string().starts_with("Journey #0: "));
}

#[tokio::test]
async fn test_scoped_journeys_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage/fr-idf/journeys"))
        .and(query_param("datetime_represents", "arrival"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_journeys_json()))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let request = JourneyRequest::default()
        .with_from(&Id::new("stop_area:A"))
        .arriving_by(date());

    let results = session.scope("fr-idf").journeys(&request).await.unwrap();
    assert_eq!(results.info.url.path(), "/coverage/fr-idf/journeys");
}

#[tokio::test]
async fn test_journeys_without_endpoints_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let result = session.journeys(&JourneyRequest::default()).await;
    assert!(matches!(result, Err(NavitiaError::InvalidRequest(_))));
}

// ============================================================================
// Places & explore
// ============================================================================

#[tokio::test]
async fn test_places_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage/fr-idf/places"))
        .and(query_param("q", "gare de lyon"))
        .and(query_param("type[]", "stop_area"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_places_json()))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let request = PlacesRequest {
        types: vec![EmbeddedType::StopArea],
        ..PlacesRequest::new("gare de lyon")
    };

    let results = session.scope("fr-idf").places(&request).await.unwrap();
    assert_eq!(results.places.len(), 2);
    assert_eq!(results.places[0].quality, 90);

    let places = results.into_places().unwrap();
    assert_eq!(places[0].name(), "Gare de Lyon");
    assert!(places[0].coordinates().is_some());
}

#[tokio::test]
async fn test_explore_related_objects() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/coverage/fr-idf/stop_areas/stop_area:OIF:SA:8768600/lines",
        ))
        .and(query_param("depth", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "pagination": {"start_page": 0, "items_on_page": 1, "items_per_page": 25, "total_result": 1},
                "lines": [{"id": "line:OIF:810:A", "name": "RER A", "code": "A", "color": "E2231A"}]
            }"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let scope = session.scope("fr-idf");
    let containers: Vec<Container> = serde_json::from_str::<serde_json::Value>(sample_places_json())
        .map(|v| serde_json::from_value(v["places"].clone()).unwrap())
        .unwrap();

    let handles = scope.related(&containers);
    assert_eq!(handles.len(), 1);

    let request = ExploreRequest {
        depth: 2,
        ..ExploreRequest::default()
    };
    let results = handles[0].explore(Collection::Lines, &request).await.unwrap();
    assert_eq!(results.objects.len(), 1);
    let PtObject::Line(line) = &results.objects[0] else {
        panic!("expected a line");
    };
    assert_eq!(line.code, "A");
    assert_eq!(line.color.unwrap().to_string(), "E2231A");
}

#[tokio::test]
async fn test_scope_explore_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage/fr-idf/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"networks": [{"id": "network:RAT:1", "name": "RATP"}, {"id": "network:SNCF", "name": "SNCF"}]}"#,
        ))
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let results = session
        .scope("fr-idf")
        .explore(Collection::Networks, &ExploreRequest::default())
        .await
        .unwrap();
    assert_eq!(results.objects.len(), 2);
    assert_eq!(results.objects[1].to_string(), "SNCF [network:SNCF]");
}

// ============================================================================
// Error handling
// ============================================================================

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let err = session
        .regions(&RegionRequest::default())
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert!(matches!(
        err,
        NavitiaError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn test_server_error_is_remote_and_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let err = session
        .regions(&RegionRequest::default())
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert!(matches!(err, NavitiaError::Remote { status: 500, .. }));
}

#[tokio::test]
async fn test_unknown_object_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage/nowhere"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"error": {"id": "unknown_object", "message": "Invalid id : nowhere"}}"#,
        ))
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let err = session
        .region_by_id(&Id::new("nowhere"))
        .await
        .unwrap_err();

    assert!(!err.is_retryable());
    let NavitiaError::Remote { id, message, .. } = err else {
        panic!("expected a remote error");
    };
    assert_eq!(id, "unknown_object");
    assert!(message.contains("nowhere"));
}

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"message": "no token"}"#),
        )
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let err = session
        .regions(&RegionRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NavitiaError::Unauthorized(ref m) if m == "no token"));
    assert!(!session.is_healthy().await);
}

#[tokio::test]
async fn test_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let err = session
        .regions(&RegionRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NavitiaError::ParseError(_)));
}

#[tokio::test]
async fn test_response_too_large() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(200)))
        .mount(&server)
        .await;

    let config = NavitiaConfig {
        max_response_size: 100,
        ..config_for_mock(&server.uri())
    };
    let session = Session::new(&config).unwrap();
    let err = session
        .regions(&RegionRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NavitiaError::ResponseTooLarge { limit: 100 }));
}

/// Serve `body` with chunked transfer encoding and no `Content-Length`
async fn serve_chunked(body: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let (first, second) = body.split_at(body.len() / 2);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                 Transfer-Encoding: chunked\r\nConnection: close\r\n\r\n\
                 {:x}\r\n{first}\r\n{:x}\r\n{second}\r\n0\r\n\r\n",
                first.len(),
                second.len(),
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_streamed_response_too_large() {
    const BODY: &str = r#"{"regions": [], "links": []}"#;
    let uri = serve_chunked(BODY).await;
    let limit = u64::try_from(BODY.len()).unwrap();

    let at_limit = Session::new(&NavitiaConfig {
        max_response_size: limit,
        ..config_for_mock(&uri)
    })
    .unwrap();
    let err = at_limit
        .regions(&RegionRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NavitiaError::ResponseTooLarge { limit: l } if l == limit));

    let above_limit = Session::new(&NavitiaConfig {
        max_response_size: limit + 1,
        ..config_for_mock(&uri)
    })
    .unwrap();
    let results = above_limit
        .regions(&RegionRequest::default())
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sample_regions_json())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = NavitiaConfig {
        timeout_secs: 1,
        ..config_for_mock(&server.uri())
    };
    let session = Session::new(&config).unwrap();
    let err = session
        .regions(&RegionRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NavitiaError::Timeout { timeout_secs: 1 }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_connection_failed() {
    // Nothing listens on port 1
    let session = Session::new(&config_for_mock("http://127.0.0.1:1")).unwrap();
    let err = session
        .regions(&RegionRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NavitiaError::ConnectionFailed(_)));
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_cancel_in_flight_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sample_regions_json())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let session = session_for_mock(&server).with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let started = std::time::Instant::now();
    let err = session
        .regions(&RegionRequest::default())
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, NavitiaError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_cancelled_token_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_regions_json()))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    token.cancel();
    let session = session_for_mock(&server).with_cancellation(token);

    let err = session
        .regions(&RegionRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NavitiaError::Cancelled));
}

#[tokio::test]
async fn test_cancellation_does_not_affect_parent_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_regions_json()))
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let token = CancellationToken::new();
    let _cancellable = session.with_cancellation(token.clone());
    token.cancel();

    assert!(session.regions(&RegionRequest::default()).await.is_ok());
}

// ============================================================================
// Trait seam
// ============================================================================

#[tokio::test]
async fn test_session_as_transit_api() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coverage/2.350000;48.850000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_regions_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coverage"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_regions_json()))
        .mount(&server)
        .await;

    let session = session_for_mock(&server);
    let api: &dyn TransitApi = &session;

    assert!(api.is_healthy().await);
    let region = integration_navitia::locate_region(api, &Coordinates::new_unchecked(2.35, 48.85))
        .await
        .unwrap();
    assert_eq!(region.id.as_str(), "fr-idf");
}
