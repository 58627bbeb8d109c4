//! TopoJSON decoding: quantized, delta-encoded arcs stitched back into polygon rings.

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::DataJoinError;
use crate::model::LonLat;

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    #[serde(default)]
    objects: HashMap<String, GeometryObject>,
    #[serde(default)]
    arcs: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct GeometryObject {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    id: Option<FeatureId>,
    #[serde(default)]
    arcs: Option<ArcRefs>,
    #[serde(default)]
    geometries: Vec<GeometryObject>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FeatureId {
    Text(String),
    Number(serde_json::Number),
}

impl FeatureId {
    fn into_string(self) -> String {
        match self {
            FeatureId::Text(s) => s,
            FeatureId::Number(n) => n.to_string(),
        }
    }
}

// Order matters: the deepest nesting is tried first.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArcRefs {
    Polygons(Vec<Vec<Vec<i64>>>),
    Rings(Vec<Vec<i64>>),
    Line(serde::de::IgnoredAny),
}

/// A decoded polygonal geometry with its raw (unnormalised) identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: String,
    pub rings: Vec<Vec<LonLat>>,
}

/// Decode every polygonal geometry of `object_key`. Geometries without an id are skipped.
pub fn decode_shapes(json: &str, object_key: &str) -> Result<Vec<Shape>, DataJoinError> {
    let topo: Topology = serde_json::from_str(json)?;
    let arcs = absolute_arcs(&topo.arcs, topo.transform);
    let root = topo
        .objects
        .get(object_key)
        .ok_or_else(|| DataJoinError::MissingObject(object_key.to_string()))?;
    let mut shapes = Vec::new();
    collect(root, &arcs, &mut shapes)?;
    Ok(shapes)
}

fn absolute_arcs(arcs: &[Vec<[f64; 2]>], transform: Option<Transform>) -> Vec<Vec<LonLat>> {
    arcs.iter()
        .map(|arc| match transform {
            Some(t) => {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .map(|[dx, dy]| {
                        x += dx;
                        y += dy;
                        (x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1])
                    })
                    .collect()
            }
            None => arc.iter().map(|[x, y]| (*x, *y)).collect(),
        })
        .collect()
}

fn collect(
    obj: &GeometryObject,
    arcs: &[Vec<LonLat>],
    out: &mut Vec<Shape>,
) -> Result<(), DataJoinError> {
    match obj.kind.as_deref() {
        Some("GeometryCollection") => {
            for g in &obj.geometries {
                collect(g, arcs, out)?;
            }
        }
        Some("Polygon") | Some("MultiPolygon") => {
            let Some(id) = obj.id.as_ref() else {
                return Ok(());
            };
            let polygons: Vec<&[Vec<i64>]> = match &obj.arcs {
                Some(ArcRefs::Polygons(p)) => p.iter().map(|r| r.as_slice()).collect(),
                Some(ArcRefs::Rings(r)) => vec![r.as_slice()],
                _ => Vec::new(),
            };
            let mut rings = Vec::new();
            for polygon in polygons {
                for ring in polygon {
                    rings.push(stitch(ring, arcs)?);
                }
            }
            out.push(Shape {
                id: id.clone().into_string(),
                rings,
            });
        }
        _ => {}
    }
    Ok(())
}

/// Join arc references into one ring; `~i` walks arc `i` backwards.
fn stitch(refs: &[i64], arcs: &[Vec<LonLat>]) -> Result<Vec<LonLat>, DataJoinError> {
    let mut ring: Vec<LonLat> = Vec::new();
    for &r in refs {
        let idx = if r < 0 { !r } else { r };
        let arc = usize::try_from(idx)
            .ok()
            .and_then(|i| arcs.get(i))
            .ok_or(DataJoinError::ArcIndex(r))?;
        // Consecutive arcs share their joining point.
        ring.pop();
        if r < 0 {
            ring.extend(arc.iter().rev());
        } else {
            ring.extend(arc.iter());
        }
    }
    Ok(ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"{
        "type": "Topology",
        "objects": {
            "countries": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": "004", "arcs": [[0, 1]]},
                    {"type": "MultiPolygon", "id": 250, "arcs": [[[-2, -1]], [[2]]]},
                    {"type": "Polygon", "arcs": [[2]]},
                    {"type": null}
                ]
            }
        },
        "arcs": [
            [[0, 0], [10, 0], [10, 10]],
            [[10, 10], [0, 10], [0, 0]],
            [[20, 20], [21, 20], [21, 21], [20, 20]]
        ]
    }"#;

    #[test]
    fn stitches_arcs_and_skips_anonymous_geometries() {
        let shapes = decode_shapes(SIMPLE, "countries").unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].id, "004");
        assert_eq!(
            shapes[0].rings[0],
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]
        );
        assert_eq!(shapes[1].id, "250");
        assert_eq!(shapes[1].rings.len(), 2);
        assert_eq!(
            shapes[1].rings[0],
            vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn line_geometries_are_skipped() {
        let json = r#"{
            "objects": {"countries": {"type": "GeometryCollection", "geometries": [
                {"type": "LineString", "id": "7", "arcs": [0]},
                {"type": "Polygon", "id": "8", "arcs": [[0]]}
            ]}},
            "arcs": [[[0, 0], [1, 0], [1, 1], [0, 0]]]
        }"#;
        let shapes = decode_shapes(json, "countries").unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].id, "8");
    }

    #[test]
    fn applies_quantization_transform() {
        let json = r#"{
            "type": "Topology",
            "transform": {"scale": [0.5, 2.0], "translate": [-180, -90]},
            "objects": {"countries": {"type": "Polygon", "id": "1", "arcs": [[0]]}},
            "arcs": [[[0, 0], [4, 0], [0, 3], [-4, -3]]]
        }"#;
        let shapes = decode_shapes(json, "countries").unwrap();
        assert_eq!(
            shapes[0].rings[0],
            vec![(-180.0, -90.0), (-178.0, -90.0), (-178.0, -84.0), (-180.0, -90.0)]
        );
    }

    #[test]
    fn reports_missing_object_and_bad_arc() {
        assert!(matches!(
            decode_shapes(SIMPLE, "land"),
            Err(DataJoinError::MissingObject(k)) if k == "land"
        ));
        let json = r#"{"objects": {"countries": {"type": "Polygon", "id": "1", "arcs": [[5]]}}, "arcs": []}"#;
        assert!(matches!(
            decode_shapes(json, "countries"),
            Err(DataJoinError::ArcIndex(5))
        ));
        assert!(matches!(
            decode_shapes("not json", "countries"),
            Err(DataJoinError::Geometry(_))
        ));
    }
}
