use serde::{Deserialize, Serialize};

use crate::model::trip::LabeledTrip;
use crate::model::AnalysisConfig;

/// the fixed origin/destination corridor predicates of the study. a trip
/// survives extraction when it matches at least one. predicates only match
/// resolved zone labels; the unresolved sentinel matches nothing.
///
/// the two UpperManhattan corridors additionally require the Manhattan-side
/// endpoint to sit at or above the configured cut-off latitude, selecting
/// destinations whose route from the airport crosses the bridges near
/// Astoria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corridor {
    AstoriaToManhattan,
    ManhattanToAstoria,
    WithinAstoria,
    AirportToAstoria,
    AstoriaToAirport,
    AirportToUpperManhattan,
    UpperManhattanToAirport,
    UpperEastSideToMidtown,
    MidtownToUpperEastSide,
    WithinUpperEastSide,
}

impl Corridor {
    pub const ALL: [Corridor; 10] = [
        Corridor::AstoriaToManhattan,
        Corridor::ManhattanToAstoria,
        Corridor::WithinAstoria,
        Corridor::AirportToAstoria,
        Corridor::AstoriaToAirport,
        Corridor::AirportToUpperManhattan,
        Corridor::UpperManhattanToAirport,
        Corridor::UpperEastSideToMidtown,
        Corridor::MidtownToUpperEastSide,
        Corridor::WithinUpperEastSide,
    ];

    pub fn matches(&self, trip: &LabeledTrip, c: &AnalysisConfig) -> bool {
        let pickup = &trip.pickup;
        let dropoff = &trip.dropoff;
        match self {
            Corridor::AstoriaToManhattan => {
                pickup.zone_in(&c.astoria) && dropoff.borough_is(&c.manhattan_borough)
            }
            Corridor::ManhattanToAstoria => {
                dropoff.zone_in(&c.astoria) && pickup.borough_is(&c.manhattan_borough)
            }
            Corridor::WithinAstoria => pickup.zone_in(&c.astoria) && dropoff.zone_in(&c.astoria),
            Corridor::AirportToAstoria => {
                pickup.zone_is(&c.airport_zone) && dropoff.zone_in(&c.astoria)
            }
            Corridor::AstoriaToAirport => {
                dropoff.zone_is(&c.airport_zone) && pickup.zone_in(&c.astoria)
            }
            Corridor::AirportToUpperManhattan => {
                pickup.zone_is(&c.airport_zone)
                    && trip.record.dropoff_latitude >= c.upper_manhattan_lat
                    && dropoff.borough_is(&c.manhattan_borough)
            }
            Corridor::UpperManhattanToAirport => {
                dropoff.zone_is(&c.airport_zone)
                    && trip.record.pickup_latitude >= c.upper_manhattan_lat
                    && pickup.borough_is(&c.manhattan_borough)
            }
            Corridor::UpperEastSideToMidtown => {
                pickup.zone_in(&c.upper_east_side) && dropoff.zone_in(&c.midtown)
            }
            Corridor::MidtownToUpperEastSide => {
                dropoff.zone_in(&c.upper_east_side) && pickup.zone_in(&c.midtown)
            }
            Corridor::WithinUpperEastSide => {
                pickup.zone_in(&c.upper_east_side) && dropoff.zone_in(&c.upper_east_side)
            }
        }
    }

    /// OR-combination of the full predicate set, as applied at extraction.
    pub fn matches_any(trip: &LabeledTrip, config: &AnalysisConfig) -> bool {
        Corridor::ALL.iter().any(|corridor| corridor.matches(trip, config))
    }
}
