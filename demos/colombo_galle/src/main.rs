//! colombo_galle — end-to-end walk through the econav planner.
//!
//! Plans Colombo → Galle, reports a traffic hotspot three times on the
//! route, lets the planner reroute around it, then starts driving and
//! prints the trip record the host would post to its trip service.
//!
//! Runs offline against stub providers.  Set `HERE_API_KEY` to geocode
//! and route with HERE instead.  An optional first argument names a
//! planner config JSON file.  Log level follows `RUST_LOG`.

mod fixtures;

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use eco_core::{GeoPoint, Timestamp};
use eco_fleet::load_vehicles_reader;
use eco_planner::{MarkerKind, PlannerBuilder, PlannerConfig, RecordingMap, RerouteOutcome};
use eco_spatial::{Geocoder, HereClient, RoutingProvider};

use fixtures::{DESTINATION, ORIGIN, VEHICLES_CSV};

// ── Constants ─────────────────────────────────────────────────────────────────

const VEHICLE:     &str = "axio";
const TAP_COUNT:   u32  = 3;
const TAP_SPACING: u64  = 20_000; // ms between reports

// ── Providers ─────────────────────────────────────────────────────────────────

type Providers = (Box<dyn Geocoder>, Box<dyn RoutingProvider>);

fn providers() -> Result<Providers> {
    match std::env::var("HERE_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            println!("Providers: HERE");
            let geocoder: Box<dyn Geocoder> = Box::new(HereClient::new(key.clone())?);
            let router: Box<dyn RoutingProvider> = Box::new(HereClient::new(key)?);
            Ok((geocoder, router))
        }
        _ => {
            println!("Providers: offline stubs (set HERE_API_KEY for live routing)");
            let geocoder: Box<dyn Geocoder> = Box::new(fixtures::geocoder());
            let router: Box<dyn RoutingProvider> = Box::new(fixtures::router()?);
            Ok((geocoder, router))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== econav: Colombo → Galle ===");

    // ── 1. Configuration and fleet ────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => PlannerConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("loading planner config {path}"))?,
        None => PlannerConfig::default(),
    };
    let fleet = load_vehicles_reader(Cursor::new(VEHICLES_CSV))?;
    println!("Vehicles: {} loaded, driving '{VEHICLE}'", fleet.len());

    // ── 2. Build the planner ──────────────────────────────────────────────
    let (geocoder, router) = providers()?;
    let mut planner = PlannerBuilder::new(geocoder, router, RecordingMap::new())
        .config(config)
        .vehicles(fleet)
        .selected_vehicle(VEHICLE)
        .build()?;

    // ── 3. Plan the trip ──────────────────────────────────────────────────
    let route = planner.plan_trip(ORIGIN, DESTINATION)?;
    println!("Route:    {}", route.summary_line());

    // Report congestion at the middle vertex of the planned route.
    let hotspot: GeoPoint = route
        .points
        .get(route.points.len() / 2)
        .copied()
        .context("planned route has no vertices")?;
    println!("Hotspot:  {hotspot}");

    // ── 4. Report incidents ───────────────────────────────────────────────
    let t0 = Timestamp::now();
    let mut outcome = RerouteOutcome::NoCluster;
    for n in 0..TAP_COUNT {
        outcome = planner.on_tap(hotspot, t0.plus_ms(u64::from(n) * TAP_SPACING))?;
        println!("  tap {}: {}", n + 1, describe(&outcome));
    }

    let state = planner.state();
    if let Some(current) = &state.current {
        println!("Now:      {} ({:?})", current.summary_line(), current.kind);
    }
    println!(
        "Eco:      {} points | trip {:.2} kg | community {:.2} kg saved",
        state.eco.points, state.eco.trip_co2_saved_kg, state.eco.community_co2_saved_kg
    );
    println!(
        "Map:      {} warning marker(s), {} incident marker(s)",
        planner.map().markers(MarkerKind::Warning).len(),
        planner.map().markers(MarkerKind::Incident).len()
    );

    // ── 5. Drive ──────────────────────────────────────────────────────────
    let record = planner.start_driving()?;
    println!("Trip:     {}", serde_json::to_string_pretty(&record)?);

    let path = planner.state().current.as_ref().map(|r| r.points.clone()).unwrap_or_default();
    for point in path {
        planner.update_position(point);
    }
    if let Some(at) = planner.map().current_location() {
        println!("Arrived:  {at}");
    }
    planner.stop_driving();

    for notice in planner.map().notices() {
        println!("  [{:?}] {}", notice.level, notice.message);
    }
    Ok(())
}

fn describe(outcome: &RerouteOutcome) -> String {
    match outcome {
        RerouteOutcome::NoCluster => "no cluster yet".to_owned(),
        RerouteOutcome::NotWarranted { clusters } => {
            format!("{clusters} cluster(s), not enough reports to reroute")
        }
        RerouteOutcome::Rerouted { avoided, co2_saved_kg } => {
            format!("rerouted around {avoided}, {co2_saved_kg:.2} kg CO2 saved")
        }
        RerouteOutcome::KeptOriginal { avoided } => {
            format!("no alternative around {avoided}, original kept")
        }
        RerouteOutcome::OriginalUnavailable => "original route unavailable".to_owned(),
        RerouteOutcome::Failed(e) => format!("reroute failed: {e}"),
    }
}
