use nalgebra::Rotation3;
use voxel_profile::{shapes, PipelineParams, ProfilePipeline, ScanBudget};

fn main() {
    // Demo: a rotated ellipsoid, profiled along its own axes
    let rotation = Rotation3::from_euler_angles(0.4, -0.3, 1.1);
    let grid = match shapes::ellipsoid([24.0, 12.0, 6.0], rotation, 0) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("could not build the ellipsoid: {err}");
            return;
        }
    };

    let pipeline = ProfilePipeline::new(PipelineParams {
        image_size: 64,
        scan_budget: ScanBudget::Extent,
        ..Default::default()
    });
    match pipeline.run(&grid) {
        Ok(res) => {
            for (label, image) in res.labelled_profiles() {
                println!("{label}: hits={}", image.hit_count());
            }
            println!("total_ms={:.3}", res.report.timings.total_ms);
        }
        Err(err) => eprintln!("profile extraction failed: {err}"),
    }
}
