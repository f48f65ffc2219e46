use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;


// A board annotation as produced by the widget's drawing layer: an arrow when `dest` is set,
// a circle around `orig` otherwise.
//
// Shapes travel from one client to the server and from the server to every client, so fields
// this layer doesn't interpret (piece overlays, brush modifiers, ...) are preserved verbatim.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DrawShape {
    pub orig: Coord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brush: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl DrawShape {
    pub fn arrow(orig: Coord, dest: Coord, brush: &str) -> Self {
        DrawShape {
            orig,
            dest: Some(dest),
            brush: Some(brush.to_owned()),
            extra: BTreeMap::new(),
        }
    }
    pub fn circle(orig: Coord, brush: &str) -> Self {
        DrawShape {
            orig,
            dest: None,
            brush: Some(brush.to_owned()),
            extra: BTreeMap::new(),
        }
    }

    pub fn is_arrow(&self) -> bool { self.dest.is_some_and(|dest| dest != self.orig) }
}

// Adding a shape that is already present removes it. This mirrors how the widget treats a
// repeated stroke and lets text front-ends offer the same toggle semantics.
pub fn toggle_shape(shapes: &mut Vec<DrawShape>, shape: DrawShape) {
    if let Some(existing) = shapes
        .iter()
        .position(|s| s.orig == shape.orig && s.dest == shape.dest)
    {
        shapes.remove(existing);
    } else {
        shapes.push(shape);
    }
}
