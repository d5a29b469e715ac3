//! Per-pair aggregation across all travel modes.

use tracing::{debug, info};

use crate::domain::{
    DirectionMeasurements, DirectionRecord, PostcodePair, PostcodeStatus, TravelMode,
    is_valid_postcode,
};

use super::api::MapsApi;
use super::mode::ModeDistanceFetcher;
use super::pacer::Pacer;
use super::transit::TransitAggregator;

/// Classify the postcodes of a pair.
///
/// An invalid origin or destination takes precedence over invalid
/// waypoints.
pub fn classify_postcodes(pair: &PostcodePair) -> PostcodeStatus {
    let origin_ok = is_valid_postcode(&pair.origin);
    let destination_ok = is_valid_postcode(&pair.destination);
    let waypoints_ok = pair.waypoints.iter().all(|w| is_valid_postcode(w));

    match (origin_ok, destination_ok, waypoints_ok) {
        (false, false, _) => PostcodeStatus::BothInvalid,
        (false, true, _) => PostcodeStatus::OriginInvalid,
        (true, false, _) => PostcodeStatus::DestinationInvalid,
        (true, true, false) => PostcodeStatus::WaypointInvalid,
        (true, true, true) => PostcodeStatus::Ok,
    }
}

/// Builds one [`DirectionRecord`] per input pair.
///
/// Requests are issued one at a time: driving, bicycling and walking, then
/// transit (hop by hop when there are waypoints).
pub struct DirectionAggregator<'a, A, P> {
    modes: ModeDistanceFetcher<'a, A, P>,
    transit: TransitAggregator<'a, A, P>,
}

impl<'a, A: MapsApi, P: Pacer> DirectionAggregator<'a, A, P> {
    pub fn new(api: &'a A, pacer: &'a P) -> Self {
        Self {
            modes: ModeDistanceFetcher::new(api, pacer),
            transit: TransitAggregator::new(api, pacer),
        }
    }

    /// Validate and measure one pair.
    ///
    /// A pair with any invalid postcode is rejected without a single request.
    /// Otherwise every mode is fetched, and a failure in one mode does not
    /// affect the others.
    pub async fn aggregate(
        &self,
        pair: &PostcodePair,
        departure_time: Option<i64>,
    ) -> DirectionRecord {
        let status = classify_postcodes(pair);
        if status != PostcodeStatus::Ok {
            info!(
                id = %pair.id,
                origin = %pair.origin,
                destination = %pair.destination,
                %status,
                "Skipping pair with invalid postcode"
            );
            return DirectionRecord::rejected(pair, status);
        }

        let origin = pair.origin.as_str();
        let destination = pair.destination.as_str();
        let waypoints = pair.waypoints.as_slice();

        let driving = self
            .modes
            .fetch(TravelMode::Driving, origin, destination, waypoints)
            .await;
        let bicycling = self
            .modes
            .fetch(TravelMode::Bicycling, origin, destination, waypoints)
            .await;
        let walking = self
            .modes
            .fetch(TravelMode::Walking, origin, destination, waypoints)
            .await;
        let transit = self
            .transit
            .fetch(origin, destination, waypoints, departure_time)
            .await;

        debug!(
            id = %pair.id,
            driving = %driving.status(),
            bicycling = %bicycling.status(),
            walking = %walking.status(),
            transit = %transit.status,
            "Pair aggregated"
        );

        DirectionRecord::measured(
            pair,
            DirectionMeasurements {
                driving,
                bicycling,
                walking,
                transit,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::mock::{
        Canned, CannedStep, CountingPacer, MockMaps, route_body, status_only, transit_body,
    };
    use crate::domain::RouteStatus;

    fn pair(origin: &str, destination: &str) -> PostcodePair {
        PostcodePair::new("42", origin, destination)
    }

    #[test]
    fn decision_table() {
        assert_eq!(classify_postcodes(&pair("B1 1AA", "M1 1AE")), PostcodeStatus::Ok);
        assert_eq!(
            classify_postcodes(&pair("B1 1AA", "nowhere")),
            PostcodeStatus::DestinationInvalid
        );
        assert_eq!(
            classify_postcodes(&pair("nowhere", "M1 1AE")),
            PostcodeStatus::OriginInvalid
        );
        assert_eq!(
            classify_postcodes(&pair("B1 1AA", "M1 1AE").with_waypoints(["SY3 8SN", "bad"])),
            PostcodeStatus::WaypointInvalid
        );
        assert_eq!(
            classify_postcodes(&pair("12345", "SW1A1AA")),
            PostcodeStatus::BothInvalid
        );
        assert_eq!(
            classify_postcodes(&pair("12345", "SW1A1AA").with_waypoints(["B1 1AA"])),
            PostcodeStatus::BothInvalid
        );
    }

    #[test]
    fn endpoint_failure_outranks_waypoint_failure() {
        assert_eq!(
            classify_postcodes(&pair("nowhere", "M1 1AE").with_waypoints(["bad"])),
            PostcodeStatus::OriginInvalid
        );
        assert_eq!(
            classify_postcodes(&pair("B1 1AA", "nowhere").with_waypoints(["bad"])),
            PostcodeStatus::DestinationInvalid
        );
    }

    #[tokio::test]
    async fn invalid_origin_makes_no_requests() {
        let maps = MockMaps::new();
        let pacer = CountingPacer::default();
        let aggregator = DirectionAggregator::new(&maps, &pacer);

        let record = aggregator.aggregate(&pair("12345", "M1 1AE"), Some(1)).await;

        assert_eq!(record.postcode_status(), PostcodeStatus::OriginInvalid);
        assert!(record.measurements().is_none());
        assert_eq!(record.id, "42");
        assert_eq!(record.origin, "12345");
        assert_eq!(record.destination, "M1 1AE");
        assert_eq!(maps.api_call_count(), 0);
        assert_eq!(pacer.pauses(), 0);
    }

    #[tokio::test]
    async fn invalid_waypoint_makes_no_requests() {
        let maps = MockMaps::new();
        let pacer = CountingPacer::default();
        let aggregator = DirectionAggregator::new(&maps, &pacer);

        let p = pair("B1 1AA", "M1 1AE").with_waypoints(["SY3 8SN", "99"]);
        let record = aggregator.aggregate(&p, None).await;

        assert_eq!(record.postcode_status(), PostcodeStatus::WaypointInvalid);
        assert_eq!(maps.api_call_count(), 0);
    }

    #[tokio::test]
    async fn valid_pair_merges_every_mode() {
        let mut maps = MockMaps::new();
        maps.on_directions(
            TravelMode::Driving,
            "B1 1AA",
            "M1 1AE",
            Canned::Body(route_body(&[(140_000.0, 6_000.0)])),
        );
        maps.on_directions(
            TravelMode::Bicycling,
            "B1 1AA",
            "M1 1AE",
            Canned::Body(route_body(&[(130_000.0, 30_000.0)])),
        );
        maps.on_directions(
            TravelMode::Walking,
            "B1 1AA",
            "M1 1AE",
            Canned::Body(route_body(&[(125_000.0, 90_000.0)])),
        );
        maps.on_directions(
            TravelMode::Transit,
            "B1 1AA",
            "M1 1AE",
            Canned::Body(transit_body(
                150_000.0,
                7_200.0,
                &[
                    CannedStep::Walk(400.0),
                    CannedStep::Ride(149_000.0, Some("XC")),
                    CannedStep::Walk(600.0),
                ],
            )),
        );
        let pacer = CountingPacer::default();
        let aggregator = DirectionAggregator::new(&maps, &pacer);

        let record = aggregator
            .aggregate(&pair("B1 1AA", "M1 1AE"), Some(1_767_772_800))
            .await;

        assert_eq!(record.postcode_status(), PostcodeStatus::Ok);
        let m = record.measurements().unwrap();
        assert_eq!(m.driving.distance_m(), Some(140_000.0));
        assert_eq!(m.bicycling.duration_s(), Some(30_000.0));
        assert_eq!(m.walking.distance_m(), Some(125_000.0));
        assert_eq!(m.transit.status, RouteStatus::Ok);
        assert_eq!(m.transit.metrics.unwrap().total_walk_m, 1000.0);
        assert_eq!(m.transit.lines, vec!["XC"]);

        let modes: Vec<TravelMode> = maps.requests().iter().map(|r| r.mode).collect();
        assert_eq!(
            modes,
            vec![
                TravelMode::Driving,
                TravelMode::Bicycling,
                TravelMode::Walking,
                TravelMode::Transit
            ]
        );
        assert_eq!(pacer.pauses(), 4);
    }

    #[tokio::test]
    async fn one_mode_failing_does_not_block_others() {
        let mut maps = MockMaps::new();
        maps.on_directions(TravelMode::Driving, "B1 1AA", "M1 1AE", Canned::Unavailable);
        maps.on_directions(
            TravelMode::Bicycling,
            "B1 1AA",
            "M1 1AE",
            Canned::Body(status_only("ZERO_RESULTS")),
        );
        maps.on_directions(
            TravelMode::Walking,
            "B1 1AA",
            "M1 1AE",
            Canned::Body(route_body(&[(125_000.0, 90_000.0)])),
        );
        let pacer = CountingPacer::default();
        let aggregator = DirectionAggregator::new(&maps, &pacer);

        let record = aggregator.aggregate(&pair("B1 1AA", "M1 1AE"), None).await;

        let m = record.measurements().unwrap();
        assert_eq!(m.driving.status(), &RouteStatus::NetworkError);
        assert_eq!(m.bicycling.status(), &RouteStatus::ZeroResults);
        assert_eq!(m.walking.status(), &RouteStatus::Ok);
        // Transit was not registered, so the mock answers NOT_FOUND.
        assert_eq!(m.transit.status, RouteStatus::NotFound);
        assert_eq!(maps.api_call_count(), 4);
    }

    #[tokio::test]
    async fn waypoints_shared_by_road_modes_and_chained_for_transit() {
        let maps = MockMaps::new();
        let pacer = CountingPacer::default();
        let aggregator = DirectionAggregator::new(&maps, &pacer);

        let p = pair("TF9 1RW", "NE6 5DB").with_waypoints(["SY3 8SN", "CH1 3AG"]);
        aggregator.aggregate(&p, None).await;

        let requests = maps.requests();
        // 3 road modes with waypoints in one request each, then 3 transit hops
        assert_eq!(requests.len(), 6);
        for r in &requests[..3] {
            assert_eq!(r.waypoints, vec!["SY3 8SN", "CH1 3AG"]);
        }
        let hops: Vec<(&str, &str)> = requests[3..]
            .iter()
            .map(|r| (r.origin.as_str(), r.destination.as_str()))
            .collect();
        assert_eq!(
            hops,
            vec![
                ("TF9 1RW", "SY3 8SN"),
                ("SY3 8SN", "CH1 3AG"),
                ("CH1 3AG", "NE6 5DB")
            ]
        );
    }
}
