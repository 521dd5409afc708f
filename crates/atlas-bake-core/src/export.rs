use std::io::Write;

use serde_json::{json, Value};

use crate::error::Result;
use crate::pipeline::PackOutput;

/// Write the plain-text sidecar: a header line, then one CSV-ish line per
/// placed image in cache order (most recent first):
/// `<key>, <x>, <y>, <u>, <v>, <width>, <height>`.
pub fn write_metadata_txt<W: Write>(out: &mut W, output: &PackOutput) -> Result<()> {
    writeln!(out, "Atlas meta data")?;
    for p in &output.placements {
        writeln!(
            out,
            "{}, {}, {}, {:.6}, {:.6}, {}, {}",
            p.key, p.x, p.y, p.u, p.v, p.width, p.height
        )?;
    }
    Ok(())
}

/// JSON rendering of the same records plus atlas-level meta.
pub fn to_json(output: &PackOutput) -> Value {
    json!({
        "meta": {
            "app": "atlas-bake",
            "version": env!("CARGO_PKG_VERSION"),
            "width": output.width,
            "height": output.height,
            "bpp": output.bpp,
            "occupancy": output.stats.occupancy,
        },
        "placements": output.placements,
    })
}
