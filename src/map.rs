//! The joined country set and the geometry queries the map view needs.

use crate::error::DataJoinError;
use crate::geo::{NameTable, Projection, decode_shapes, normalize_id};
use crate::model::Country;
use crate::state::Camera;
use crate::util::{clog, cwarn};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderedMap {
    pub countries: Vec<Country>,
    /// Geometries dropped for lacking a name entry.
    pub dropped: usize,
}

impl RenderedMap {
    /// Join world geometry to display names. Unmatched geometries are dropped silently.
    pub fn initialize(
        world_json: &str,
        object_key: &str,
        names_csv: &str,
    ) -> Result<Self, DataJoinError> {
        let names = NameTable::from_csv(names_csv)?;
        if names.is_empty() {
            cwarn("country name table has no entries; every geometry will be dropped");
        }
        let shapes = decode_shapes(world_json, object_key)?;
        let total = shapes.len();
        let countries: Vec<Country> = shapes
            .into_iter()
            .filter_map(|s| {
                let name = names.get(&s.id)?.to_string();
                Some(Country::new(normalize_id(&s.id), name, s.rings))
            })
            .collect();
        let dropped = total - countries.len();
        clog(&format!(
            "map data joined: {} countries, {} unnamed geometries dropped",
            countries.len(),
            dropped
        ));
        Ok(Self { countries, dropped })
    }

    pub fn get(&self, id: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.id == id)
    }

    /// Country under a canvas pixel; the last drawn shape wins on overlap.
    pub fn country_at(
        &self,
        canvas_xy: (f64, f64),
        projection: &Projection,
        camera: &Camera,
    ) -> Option<&Country> {
        let lonlat = projection.invert(camera.invert(canvas_xy));
        self.countries.iter().rev().find(|c| c.contains(lonlat))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two unit-ish squares: France (id 250) around (2, 46) and Japan (id 392) around (138, 36),
    /// plus an unnamed geometry (id 999).
    pub(crate) const WORLD: &str = r#"{
        "type": "Topology",
        "objects": {"countries": {"type": "GeometryCollection", "geometries": [
            {"type": "Polygon", "id": "250", "arcs": [[0]]},
            {"type": "Polygon", "id": "392", "arcs": [[1]]},
            {"type": "Polygon", "id": "999", "arcs": [[2]]}
        ]}},
        "arcs": [
            [[-3, 42], [8, 42], [8, 51], [-3, 51], [-3, 42]],
            [[130, 31], [146, 31], [146, 45], [130, 45], [130, 31]],
            [[-60, -60], [-50, -60], [-50, -50], [-60, -60]]
        ]
    }"#;

    pub(crate) const NAMES: &str = "id,name\n250,France\n392,Japan\n004,Afghanistan\n";

    pub(crate) fn sample_map() -> RenderedMap {
        RenderedMap::initialize(WORLD, "countries", NAMES).unwrap()
    }

    #[test]
    fn join_keeps_only_named_geometries() {
        let map = sample_map();
        let ids: Vec<&str> = map.countries.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["250", "392"]);
        assert_eq!(map.dropped, 1);
        assert_eq!(map.get("392").unwrap().name, "Japan");
        assert!(map.get("999").is_none());
    }

    #[test]
    fn either_source_failing_fails_the_join() {
        assert!(RenderedMap::initialize("{", "countries", NAMES).is_err());
        assert!(RenderedMap::initialize(WORLD, "countries", "nope\n1\n").is_err());
    }

    #[test]
    fn hit_test_follows_camera() {
        let map = sample_map();
        let projection = Projection::fit(1000.0, 500.0);
        let mut camera = Camera::default();
        let paris = projection.project((2.35, 48.85));
        assert_eq!(map.country_at(paris, &projection, &camera).unwrap().name, "France");
        let ocean = projection.project((-30.0, 0.0));
        assert!(map.country_at(ocean, &projection, &camera).is_none());

        camera.zoom_at(0.0, 0.0, 4.0, Default::default());
        assert!(map.country_at(paris, &projection, &camera).is_none());
        let zoomed = camera.apply(projection.project((139.7, 35.7)));
        assert_eq!(map.country_at(zoomed, &projection, &camera).unwrap().name, "Japan");
    }
}
