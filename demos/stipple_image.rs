//! Example: stipple an image
//!
//! Usage: `cargo run --example stipple_image [input.png] [output.png]`
//!
//! Without an input, a synthetic left-to-right gradient is stippled.
//! Set `RUST_LOG=debug` to follow each relaxation step.

use image::{GrayImage, Luma};
use voronoi_stipple::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next();
    let output = args.next().unwrap_or_else(|| "stipples.png".to_string());

    let field = match &input {
        Some(path) => DensityField::from_image(&image::open(path)?),
        None => DensityField::from_luma(GrayImage::from_fn(300, 200, |x, _| {
            Luma([(x * 255 / 299) as u8])
        })),
    };
    let (width, height) = (field.width(), field.height());
    println!("Stippling {}x{} surface", width, height);

    let config = StippleConfigBuilder::new()
        .seed(42)
        .point_count(400)
        .stipple_size(1.5)?
        .max_steps(300)
        .show_diagram(false)
        .build()?;

    let mut target = SoftwareTarget::new(width, height)?;
    let mut stippler = Stippler::new(config)?;
    stippler.set_density(Some(field));
    stippler.start(width, height)?;

    // An interactive host would call tick once per frame instead
    while let Some(report) = stippler.tick(&mut target)? {
        if report.step % 10 == 0 {
            println!(
                "  step {}: max displacement {:.3}",
                report.step, report.max_displacement
            );
        }
    }

    println!(
        "Status {:?} after {} steps",
        stippler.status(),
        stippler.steps()
    );

    let frame = stippler.render_frame(&mut target)?;
    frame.save(&output)?;
    println!("Wrote {}", output);

    Ok(())
}
