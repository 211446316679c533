use blocked_grid::{Grid2, GridHandle, MethodSuite};

/// Binary `P6` checkerboard with `cell`-sized squares; every square gets a
/// distinct colour so transforms that land in the wrong square show up.
pub fn checkerboard_ppm(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut bytes = format!("P6\n{width} {height}\n255\n").into_bytes();
    for y in 0..height {
        for x in 0..width {
            let cx = x / cell;
            let cy = y / cell;
            let dark = (cx + cy) & 1 == 0;
            let base = if dark { 32u8 } else { 220u8 };
            bytes.extend_from_slice(&[base, (cx * 37 % 256) as u8, (cy * 53 % 256) as u8]);
        }
    }
    bytes
}

/// Grid whose cell `(col, row)` holds `row * width + col`.
pub fn numbered_grid(suite: &MethodSuite<u32>, width: usize, height: usize) -> GridHandle<u32> {
    let mut grid = suite.new_grid(width, height).expect("allocate grid");
    for row in 0..height {
        for col in 0..width {
            *suite.at_mut(&mut grid, col, row).expect("cell in range") = (row * width + col) as u32;
        }
    }
    grid
}

/// Cell-by-cell equality, independent of layout and padding.
pub fn same_cells<T: PartialEq>(a: &GridHandle<T>, b: &GridHandle<T>) -> bool {
    if a.width() != b.width() || a.height() != b.height() {
        return false;
    }
    (0..a.height()).all(|row| {
        (0..a.width()).all(|col| a.at(col, row).ok() == b.at(col, row).ok())
    })
}
