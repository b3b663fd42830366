mod layer_crs;
mod zone_label;
mod zone_layer;
mod zone_lookup;
mod zone_resolver;

pub use layer_crs::LayerCrs;
pub use zone_label::ZoneLabel;
pub use zone_layer::{ZoneFeature, ZoneLayer};
pub use zone_lookup::{ZoneLookup, ZoneLookupRow};
pub use zone_resolver::ZoneResolver;
