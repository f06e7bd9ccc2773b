use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::catalog::{CatalogBuilder, SurfaceCatalog};
use crate::domain::{Coord, Direction, LineCode, Operator, RouteKey, StationCode};
use crate::network::{RailNetwork, RailNetworkBuilder};
use crate::planner::SearchConfig;
use crate::schedule::{ScheduleError, ScheduleSource, StationBoard};

fn sc(s: &str) -> StationCode {
    StationCode::parse(s).unwrap()
}

fn c(lat: f64, lon: f64) -> Option<Coord> {
    Coord::new(lat, lon)
}

// WST - MID - EST on AAA, MID - NTH on BBB. Stations are about 2 km apart.
fn network() -> RailNetwork {
    RailNetworkBuilder::new()
        .line("AAA", "A Line", &["WST", "MID", "EST"])
        .line("BBB", "B Line", &["MID", "NTH"])
        .interchange("MID", &["AAA", "BBB"])
        .station("WST", "West", c(22.300, 114.150))
        .station("MID", "Middle", c(22.300, 114.170))
        .station("EST", "East", c(22.300, 114.190))
        .station("NTH", "North", c(22.320, 114.170))
        .build()
        .unwrap()
}

fn kmb(builder: CatalogBuilder, id: &str, lat: f64, lon: f64) -> CatalogBuilder {
    builder.stop(Operator::Kmb, id, id, c(lat, lon))
}

fn outbound(route: &str) -> RouteKey {
    RouteKey::new(route, Direction::Outbound)
}

fn catalog() -> SurfaceCatalog {
    let b = CatalogBuilder::new();
    // North of WST; KW is 56 m from the station.
    let b = kmb(b, "KA", 22.3100, 114.150);
    let b = kmb(b, "KB", 22.3095, 114.150);
    let b = kmb(b, "KW", 22.3005, 114.150);
    // KE is 56 m from EST, KF 670 m.
    let b = kmb(b, "KE", 22.3005, 114.190);
    let b = kmb(b, "KF", 22.3060, 114.190);
    // KM is 700 m north of NTH.
    let b = kmb(b, "KM", 22.3263, 114.170);
    let b = kmb(b, "KN", 22.3350, 114.170);
    // Far west of WST; KT and KU are 56 m apart.
    let b = kmb(b, "KT", 22.3005, 114.130);
    let b = kmb(b, "KU", 22.3010, 114.130);
    let b = kmb(b, "KZ", 22.3005, 114.110);

    b.stop(Operator::Citybus, "CE", "CE", c(22.3005, 114.190))
        .stop(Operator::Citybus, "CF", "CF", c(22.3060, 114.190))
        .route_stops(Operator::Kmb, outbound("1"), &["KA", "KB", "KW"])
        .route_stops(Operator::Kmb, outbound("2"), &["KE", "KF"])
        .route_stops(Operator::Kmb, outbound("3"), &["KM", "KN"])
        .route_stops(Operator::Kmb, outbound("4"), &["KW", "KT"])
        .route_stops(Operator::Kmb, outbound("5"), &["KU", "KZ"])
        .route_stops(Operator::Citybus, outbound("10"), &["CE", "CF"])
        .build()
}

struct Fixture {
    network: RailNetwork,
    catalog: SurfaceCatalog,
    search: SearchConfig,
    config: ComposerConfig,
}

impl Fixture {
    fn new() -> Self {
        Self {
            network: network(),
            catalog: catalog(),
            search: SearchConfig::default(),
            config: ComposerConfig::default(),
        }
    }

    fn composer(&self) -> Composer<'_> {
        Composer::new(&self.network, &self.catalog, &self.search, &self.config)
    }

    fn stop(&self, operator: Operator, id: &str) -> &crate::domain::Stop {
        self.catalog.stop(operator, &crate::domain::StopId::new(id)).unwrap()
    }
}

fn rail(code: &str) -> Endpoint {
    Endpoint::Rail(sc(code))
}

fn kmb_stop(id: &str) -> Endpoint {
    Endpoint::bus(Operator::Kmb, id)
}

#[test]
fn rail_to_rail_uses_search() {
    let fx = Fixture::new();
    let found = fx.composer().compose(&rail("WST"), &rail("NTH")).unwrap();

    assert_eq!(found.len(), 1);
    let it = &found[0];
    assert_eq!(it.kind(), ItineraryKind::Rail);
    let leg = it.legs.rail().unwrap();
    assert_eq!(
        leg.plan.best.lines,
        vec![LineCode::parse("AAA").unwrap(), LineCode::parse("BBB").unwrap()]
    );
    // Two stations at 2 minutes plus one interchange.
    assert_eq!(it.estimated_minutes, 9);
    assert_eq!(it.walking_m, 0.0);
}

#[test]
fn unknown_endpoints_are_input_errors() {
    let fx = Fixture::new();
    let composer = fx.composer();

    assert_eq!(
        composer.compose(&rail("XXX"), &rail("WST")),
        Err(PlanError::Input(InputError::UnknownStation(sc("XXX"))))
    );
    assert!(matches!(
        composer.compose(&rail("WST"), &kmb_stop("NOPE")),
        Err(PlanError::Input(InputError::UnknownStop { .. }))
    ));
    // Stop ids are operator-scoped.
    assert!(matches!(
        composer.compose(&Endpoint::bus(Operator::Citybus, "KA"), &rail("WST")),
        Err(PlanError::Input(_))
    ));
}

#[test]
fn bus_to_rail_via_nearest_station() {
    let fx = Fixture::new();
    let found = fx.composer().compose(&kmb_stop("KA"), &rail("EST")).unwrap();

    assert_eq!(found.len(), 1);
    let Legs::SurfaceToRail { bus, rail } = &found[0].legs else {
        panic!("expected surface to rail, got {:?}", found[0].kind());
    };
    assert_eq!(bus.route, "1");
    assert_eq!(bus.boarding.id.as_str(), "KA");
    assert_eq!(bus.alighting.id.as_str(), "KW");
    assert_eq!(bus.stop_count, 2);
    assert_eq!(rail.from, sc("WST"));
    assert_eq!(rail.to, sc("EST"));
    // 2 stops, 2 stations, 56 m walk.
    assert_eq!(found[0].estimated_minutes, 4 + 4 + 1);
}

#[test]
fn candidate_matching_rail_endpoint_is_skipped() {
    let fx = Fixture::new();
    // KW is next to WST, but a bus to the destination itself is not offered.
    let composer = fx.composer();
    assert!(composer.surface_to_rail(fx.stop(Operator::Kmb, "KW"), sc("WST")).is_empty());
    assert_eq!(
        composer.compose(&kmb_stop("KW"), &rail("WST")),
        Err(PlanError::NoRoute)
    );
}

#[test]
fn rail_to_bus_direct() {
    let fx = Fixture::new();
    let found = fx.composer().compose(&rail("WST"), &kmb_stop("KF")).unwrap();

    assert_eq!(found.len(), 1);
    let Legs::RailToSurface { rail, bus } = &found[0].legs else {
        panic!("expected rail to surface, got {:?}", found[0].kind());
    };
    assert_eq!(rail.to, sc("EST"));
    assert_eq!(bus.route, "2");
    assert_eq!(bus.boarding.id.as_str(), "KE");
    assert_eq!(bus.alighting.id.as_str(), "KF");
    assert_eq!(bus.alighting.walk_m, 0.0);
}

#[test]
fn rail_to_bus_falls_back_to_wider_radius() {
    let fx = Fixture::new();
    let found = fx.composer().compose(&rail("MID"), &kmb_stop("KN")).unwrap();

    assert_eq!(found.len(), 1);
    let Legs::RailToSurface { rail, bus } = &found[0].legs else {
        panic!("expected rail to surface, got {:?}", found[0].kind());
    };
    assert_eq!(rail.to, sc("NTH"));
    assert_eq!(bus.boarding.id.as_str(), "KM");
    assert!(bus.boarding.walk_m > 500.0 && bus.boarding.walk_m < 1000.0);
}

#[test]
fn rail_to_bus_with_interchange() {
    let fx = Fixture::new();
    let found = fx.composer().compose(&rail("EST"), &kmb_stop("KZ")).unwrap();

    assert_eq!(found.len(), 1);
    let it = &found[0];
    let Legs::RailToSurfaceWithInterchange {
        rail,
        first,
        second,
    } = &it.legs
    else {
        panic!("expected bus interchange, got {:?}", it.kind());
    };
    assert_eq!(rail.to, sc("WST"));
    assert_eq!(first.route, "4");
    assert_eq!(first.alighting.id.as_str(), "KT");
    assert_eq!(first.alighting.walk_m, 0.0);
    assert_eq!(second.route, "5");
    assert_eq!(second.boarding.id.as_str(), "KU");
    assert!(second.boarding.walk_m > 0.0 && second.boarding.walk_m <= 500.0);
    // 2 stations, 1 + 1 stops, 111 m walk.
    assert_eq!(it.estimated_minutes, 4 + 2 + 2 + 1);
}

#[test]
fn transfer_itineraries_are_capped() {
    let mut fx = Fixture::new();
    fx.config.max_transfer_itineraries = 0;
    assert_eq!(
        fx.composer().compose(&rail("EST"), &kmb_stop("KZ")),
        Err(PlanError::NoRoute)
    );
}

#[test]
fn bus_to_bus_same_operator_through_rail() {
    let fx = Fixture::new();
    let found = fx.composer().compose(&kmb_stop("KA"), &kmb_stop("KF")).unwrap();

    assert_eq!(found.len(), 1);
    let it = &found[0];
    let Legs::SurfaceRailSurface {
        first,
        rail,
        second,
    } = &it.legs
    else {
        panic!("expected surface-rail-surface, got {:?}", it.kind());
    };
    assert_eq!(first.route, "1");
    assert_eq!((rail.from, rail.to), (sc("WST"), sc("EST")));
    assert_eq!(second.route, "2");
    assert_eq!(it.estimated_minutes, 4 + 4 + 2 + 1);
}

#[test]
fn bus_to_bus_cross_operator() {
    let fx = Fixture::new();
    let found = fx
        .composer()
        .compose(&kmb_stop("KA"), &Endpoint::bus(Operator::Citybus, "CF"))
        .unwrap();

    assert_eq!(found.len(), 1);
    let Legs::CrossOperator { first, second, .. } = &found[0].legs else {
        panic!("expected cross operator, got {:?}", found[0].kind());
    };
    assert_eq!(first.operator, Operator::Kmb);
    assert_eq!(second.operator, Operator::Citybus);
    assert_eq!(second.route, "10");
}

#[test]
fn bus_to_bus_direct() {
    let fx = Fixture::new();
    let composer = fx.composer();
    let found = composer.surface(fx.stop(Operator::Kmb, "KA"), fx.stop(Operator::Kmb, "KW"));

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind(), ItineraryKind::Surface);
    assert_eq!(found[0].estimated_minutes, 4);
}

#[test]
fn bus_to_bus_without_later_alighting_stop_yields_nothing() {
    let fx = Fixture::new();
    let composer = fx.composer();
    // Route 1 runs KA -> KB -> KW only.
    let found = composer.surface(fx.stop(Operator::Kmb, "KW"), fx.stop(Operator::Kmb, "KA"));
    assert!(found.is_empty());
    assert_eq!(
        composer.compose(&kmb_stop("KW"), &kmb_stop("KA")),
        Err(PlanError::NoRoute)
    );
}

#[test]
fn stops_without_coordinates_never_match() {
    let network = network();
    let catalog = CatalogBuilder::new()
        .stop(Operator::Kmb, "K0", "Unknown", None)
        .stop(Operator::Kmb, "KW", "KW", c(22.3005, 114.150))
        .route_stops(Operator::Kmb, outbound("1"), &["K0", "KW"])
        .build();
    let search = SearchConfig::default();
    let config = ComposerConfig::default();
    let composer = Composer::new(&network, &catalog, &search, &config);

    assert_eq!(
        composer.compose(&kmb_stop("K0"), &rail("EST")),
        Err(PlanError::NoRoute)
    );
}

struct CountingSource {
    calls: AtomicUsize,
}

impl ScheduleSource for CountingSource {
    async fn fetch(
        &self,
        line: LineCode,
        station: StationCode,
    ) -> Result<StationBoard, ScheduleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ScheduleError::MissingStation { line, station })
    }
}

#[tokio::test]
async fn schedules_attach_to_rail_legs() {
    let fx = Fixture::new();
    let composer = fx.composer();
    let mut found = composer.compose(&kmb_stop("KA"), &rail("EST")).unwrap();
    found.extend(composer.surface(fx.stop(Operator::Kmb, "KA"), fx.stop(Operator::Kmb, "KW")));
    found.push(found[0].clone());

    let source = CountingSource {
        calls: AtomicUsize::new(0),
    };
    attach_schedules(&source, &fx.network, &mut found).await;

    // Both copies share one fetch of AAA at WST.
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    let schedules = found[0].legs.rail().unwrap().schedules.as_ref().unwrap();
    let aaa = &schedules[&LineCode::parse("AAA").unwrap()];
    assert_eq!(aaa.message.as_deref(), Some("No schedule available for WST on AAA"));
    assert!(found[1].legs.rail().is_none());
    assert!(found[2].legs.rail().unwrap().schedules.is_some());
}

// ORG - STA on AAA, 5 km apart. Transfers happen about 2 km east of STA and
// the destination stop DST sits another 2 km east.
fn transfer_fixture(catalog: SurfaceCatalog) -> Fixture {
    let network = RailNetworkBuilder::new()
        .line("AAA", "A Line", &["ORG", "STA"])
        .station("ORG", "Origin", c(22.300, 114.100))
        .station("STA", "Station", c(22.300, 114.150))
        .build()
        .unwrap();
    Fixture {
        network,
        catalog,
        search: SearchConfig::default(),
        config: ComposerConfig::default(),
    }
}

fn transfer_stops() -> CatalogBuilder {
    let b = CatalogBuilder::new();
    let b = kmb(b, "DST", 22.3005, 114.190);
    // P0 is 56 m from STA, P1 is the transfer point.
    let b = kmb(b, "P0", 22.3005, 114.150);
    kmb(b, "P1", 22.3005, 114.170)
}

#[test]
fn transfer_rides_onward_route_to_later_approach() {
    let b = transfer_stops();
    // Route 8 passes HN next to DST, turns back past the transfer point, then
    // returns to H3.
    let b = kmb(b, "H0", 22.3005, 114.210);
    let b = kmb(b, "HN", 22.3005, 114.1895);
    let b = kmb(b, "H1", 22.3010, 114.170);
    let b = kmb(b, "H3", 22.3005, 114.192);
    let catalog = b
        .route_stops(Operator::Kmb, outbound("7"), &["P0", "P1"])
        .route_stops(Operator::Kmb, outbound("8"), &["H0", "HN", "H1", "H3"])
        .build();
    let fx = transfer_fixture(catalog);

    let found = fx.composer().compose(&rail("ORG"), &kmb_stop("DST")).unwrap();

    assert_eq!(found.len(), 1);
    let it = &found[0];
    let Legs::RailToSurfaceWithInterchange {
        rail,
        first,
        second,
    } = &it.legs
    else {
        panic!("expected bus interchange, got {:?}", it.kind());
    };
    assert_eq!(rail.to, sc("STA"));
    assert_eq!(first.route, "7");
    assert_eq!(first.alighting.id.as_str(), "P1");
    assert_eq!(second.route, "8");
    assert_eq!(second.boarding.id.as_str(), "H1");
    assert_eq!(second.alighting.id.as_str(), "H3");
    assert_eq!(second.stop_count, 1);
    // 1 station, 1 + 1 stops, 317 m walk.
    assert_eq!(it.estimated_minutes, 2 + 2 + 2 + 4);
}

// R1 is next to the transfer point P1, R2 next to DST.
fn return_stops() -> CatalogBuilder {
    let b = kmb(transfer_stops(), "R1", 22.3010, 114.170);
    kmb(b, "R2", 22.3005, 114.1895)
}

#[test]
fn transfer_never_reboards_the_same_route() {
    // One route direction that reaches R2 before passing STA and P1.
    let looped = return_stops()
        .route_stops(Operator::Kmb, outbound("9"), &["R1", "R2", "P0", "P1"])
        .build();
    assert_eq!(
        transfer_fixture(looped)
            .composer()
            .compose(&rail("ORG"), &kmb_stop("DST")),
        Err(PlanError::NoRoute)
    );

    // The same stops served by the opposite direction do connect.
    let split = return_stops()
        .route_stops(Operator::Kmb, outbound("9"), &["P0", "P1"])
        .route_stops(Operator::Kmb, RouteKey::new("9", Direction::Inbound), &["R1", "R2"])
        .build();
    let fx = transfer_fixture(split);
    let found = fx.composer().compose(&rail("ORG"), &kmb_stop("DST")).unwrap();
    assert_eq!(found.len(), 1);
    let Legs::RailToSurfaceWithInterchange { first, second, .. } = &found[0].legs else {
        panic!("expected bus interchange, got {:?}", found[0].kind());
    };
    assert_eq!((first.route.as_str(), first.direction), ("9", Direction::Outbound));
    assert_eq!((second.route.as_str(), second.direction), ("9", Direction::Inbound));
    assert_eq!(second.boarding.id.as_str(), "R1");
}
