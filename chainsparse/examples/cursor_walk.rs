//! Walk a banded matrix with and without cursors and compare traversal cost

use chainsparse::{add, multiply, Matrix, Result};

fn main() -> Result<()> {
    let n = 200;
    println!("Building a {n} x {n} tridiagonal matrix...");

    let mut band = Matrix::new(n, n)?;
    let mut cursor = None;
    for row in 0..n {
        for column in row.saturating_sub(1)..(row + 2).min(n) {
            let value = if row == column { 2.0 } else { -1.0 };
            cursor = band.set(cursor, row, column, value)?;
        }
    }
    println!("Stored {} entries (density {:.4})", band.nnz(), band.density());

    band.reset_stats();
    for row in 0..n {
        for column in 0..n {
            band.get(None, row, column)?;
        }
    }
    let cold = band.stats();

    band.reset_stats();
    let mut cursor = None;
    for row in 0..n {
        for column in 0..n {
            cursor = band.get(cursor, row, column)?.1;
        }
    }
    let warm = band.stats();

    println!(
        "Cold scan: {} steps ({:.1} per lookup)",
        cold.steps,
        cold.steps_per_lookup()
    );
    println!(
        "Warm scan: {} steps ({:.1} per lookup)",
        warm.steps,
        warm.steps_per_lookup()
    );

    let square = multiply(&band, &band)?;
    println!("band^2 has {} entries", square.nnz());

    let mut doubled = band.clone();
    add(&mut doubled, &band)?;
    println!("band + band at (0, 0) = {}", doubled.get(None, 0, 0)?.0);

    doubled.validate()?;
    Ok(())
}
