//! Detect command implementation.

use std::path::Path;

use seamstress::marker::seam_color;
use seamstress::{auto_mark_seams, load_mesh, save_mesh};

pub fn cmd_detect(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = load_mesh(input)?;
    let before = mesh.seam_edges().count();
    let seams = auto_mark_seams(&mut mesh);

    println!("Detected {} sewing seams in {}", seams.len(), input.display());
    for &e in &seams {
        let edge = mesh.edge(e);
        println!(
            "  {}: {} - {}  {}",
            e,
            edge.verts[0],
            edge.verts[1],
            seam_color(&mesh, e)
        );
    }
    println!(
        "Seam edges: {} before, {} after",
        before,
        mesh.seam_edges().count()
    );

    if let Some(path) = output {
        save_mesh(&mesh, path)?;
        eprintln!("Wrote: {}", path.display());
    }

    Ok(())
}
