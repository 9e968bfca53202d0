//! Example: Building a VSDX package from an in-memory diagram
//!
//! This example demonstrates the workflow without any draw.io source:
//! 1. Building a `Diagram` from vertices and edges
//! 2. Mapping it onto Visio shapes and connections
//! 3. Writing the package to a file

use stencil::{
    DiagramBuilder,
    geometry::{Canvas, PixelRect},
    model::{Cell, Diagram, Edge, Vertex},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cells: Vec<Cell> = vec![
        Vertex::new(
            "client",
            "ellipse;whiteSpace=wrap;",
            Some(PixelRect::new(40.0, 40.0, 160.0, 80.0)),
            "Client",
        )
        .into(),
        Vertex::new(
            "gateway",
            "rounded=1;",
            Some(PixelRect::new(320.0, 40.0, 160.0, 80.0)),
            "API Gateway",
        )
        .into(),
        Vertex::new(
            "auth",
            "rhombus;",
            Some(PixelRect::new(320.0, 200.0, 160.0, 100.0)),
            "Authorized?",
        )
        .into(),
        Edge::new("e1", Some("client".into()), Some("gateway".into())).into(),
        Edge::new("e2", Some("gateway".into()), Some("auth".into())).into(),
    ];
    let diagram = Diagram::new(Canvas::new(800.0, 600.0)?, cells);

    let builder = DiagramBuilder::default();

    println!("Mapping diagram...");
    let mapping = builder.map(&diagram)?;
    for shape in mapping.shapes() {
        println!("  shape {} -> {}", shape.id(), shape.kind().name_u());
    }
    println!("Connections: {}", mapping.connects().len());

    let vsdx = builder.render_vsdx(&mapping)?;
    let output_path = "from_model_output.vsdx";
    std::fs::write(output_path, &vsdx)?;
    println!("VSDX written to: {} ({} bytes)", output_path, vsdx.len());

    Ok(())
}
