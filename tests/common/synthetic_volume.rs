use voxel_profile::{Domain3, GridPoint, OccupancyGrid};

/// Pixels `(x, y)` of a `size × size` raster inside the disk of `radius`
/// centred on pixel `(size/2, size/2)`, row by row.
pub fn lattice_disk(size: usize, radius: i64) -> Vec<[usize; 2]> {
    let c = (size / 2) as i64;
    let mut out = Vec::new();
    for y in 0..size {
        for x in 0..size {
            let (dx, dy) = (x as i64 - c, y as i64 - c);
            if dx * dx + dy * dy <= radius * radius {
                out.push([x, y]);
            }
        }
    }
    out
}

/// Straight rod of voxels from `-half` to `half` along the given axis
/// (0 = x, 1 = y, 2 = z) in a cube domain of half-size `reach`.
pub fn rod(axis: usize, half: i32, reach: u32) -> OccupancyGrid {
    assert!(axis < 3, "axis index must be 0, 1 or 2");
    let domain = Domain3::centered_cube(reach);
    let points = (-half..=half).map(|t| {
        let mut c = [0i32; 3];
        c[axis] = t;
        GridPoint::from(c)
    });
    OccupancyGrid::from_points(domain, points).expect("rod fits the domain")
}
