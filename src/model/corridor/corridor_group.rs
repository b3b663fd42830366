use serde::{Deserialize, Serialize};

use super::Corridor;
use crate::model::trip::LabeledTrip;
use crate::model::zone::ZoneLabel;
use crate::model::AnalysisConfig;

/// the seven corridor groupings analyzed and reported independently. most
/// groups are a straight union of corridor predicates; AstoriaAll applies the
/// airport corridor merge on top (see [`CorridorGroup::select`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorridorGroup {
    WithinAstoria,
    AstoriaToManhattan,
    ManhattanToAstoria,
    /// the Astoria pool with airport pass-through traffic merged in
    AstoriaAll,
    UpperEastSideToMidtown,
    MidtownToUpperEastSide,
    WithinUpperEastSide,
}

impl CorridorGroup {
    pub const ALL: [CorridorGroup; 7] = [
        CorridorGroup::WithinAstoria,
        CorridorGroup::AstoriaToManhattan,
        CorridorGroup::ManhattanToAstoria,
        CorridorGroup::AstoriaAll,
        CorridorGroup::UpperEastSideToMidtown,
        CorridorGroup::MidtownToUpperEastSide,
        CorridorGroup::WithinUpperEastSide,
    ];

    /// short key used for output filenames and report headings
    pub fn key(&self) -> &'static str {
        match self {
            CorridorGroup::WithinAstoria => "AA",
            CorridorGroup::AstoriaToManhattan => "AM",
            CorridorGroup::ManhattanToAstoria => "MA",
            CorridorGroup::AstoriaAll => "AAll",
            CorridorGroup::UpperEastSideToMidtown => "UMid",
            CorridorGroup::MidtownToUpperEastSide => "MidU",
            CorridorGroup::WithinUpperEastSide => "UU",
        }
    }

    /// selects this group's trips from the extracted pool. for AstoriaAll,
    /// airport legs that pass near Astoria without stopping there are merged
    /// into the Astoria pool: their pickup time is shifted forward by the
    /// configured drive-time estimate and their pickup zone relabeled, so
    /// they land in the same time-of-week buckets as genuine Astoria trips.
    pub fn select(&self, trips: &[LabeledTrip], config: &AnalysisConfig) -> Vec<LabeledTrip> {
        match self {
            CorridorGroup::WithinAstoria => filter(trips, config, &[Corridor::WithinAstoria]),
            CorridorGroup::AstoriaToManhattan => {
                filter(trips, config, &[Corridor::AstoriaToManhattan])
            }
            CorridorGroup::ManhattanToAstoria => {
                filter(trips, config, &[Corridor::ManhattanToAstoria])
            }
            CorridorGroup::UpperEastSideToMidtown => {
                filter(trips, config, &[Corridor::UpperEastSideToMidtown])
            }
            CorridorGroup::MidtownToUpperEastSide => {
                filter(trips, config, &[Corridor::MidtownToUpperEastSide])
            }
            CorridorGroup::WithinUpperEastSide => {
                filter(trips, config, &[Corridor::WithinUpperEastSide])
            }
            CorridorGroup::AstoriaAll => {
                let mut selected = filter(
                    trips,
                    config,
                    &[
                        Corridor::AstoriaToManhattan,
                        Corridor::ManhattanToAstoria,
                        Corridor::AirportToAstoria,
                        Corridor::AstoriaToAirport,
                    ],
                );
                for trip in filter(trips, config, &[Corridor::AirportToUpperManhattan]) {
                    selected.push(merge_airport_leg(trip, config.lga_to_astoria_minutes, config));
                }
                for trip in filter(trips, config, &[Corridor::UpperManhattanToAirport]) {
                    selected.push(merge_airport_leg(
                        trip,
                        config.upper_manhattan_to_lga_minutes,
                        config,
                    ));
                }
                selected
            }
        }
    }
}

fn filter(trips: &[LabeledTrip], config: &AnalysisConfig, corridors: &[Corridor]) -> Vec<LabeledTrip> {
    trips
        .iter()
        .filter(|trip| corridors.iter().any(|corridor| corridor.matches(trip, config)))
        .cloned()
        .collect()
}

/// time-shifts an airport pass-through leg to its estimated arrival near the
/// merge zone and relabels its pickup accordingly.
fn merge_airport_leg(mut trip: LabeledTrip, shift_minutes: i64, config: &AnalysisConfig) -> LabeledTrip {
    trip.record.pickup_datetime += chrono::Duration::minutes(shift_minutes);
    trip.pickup = ZoneLabel::resolved(&config.airport_merge_borough, &config.airport_merge_zone);
    trip
}
