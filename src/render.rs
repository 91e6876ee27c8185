//! Plain-text dump of a field.

use std::io::{self, Write};

use crate::stepper::Field;

/// Writes a header with the node count, then one line per row of `(y,x): value ` entries.
///
/// Values use six decimal places.
pub fn write_field<W: Write>(out: &mut W, field: &Field) -> io::Result<()> {
    writeln!(out, "Size of grid: {} nodes", field.len())?;
    for (y, row) in field.outer_iter().enumerate() {
        for (x, value) in row.iter().enumerate() {
            write!(out, "({},{}): {:.6} ", y, x, value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn layout() {
        let mut field = Field::zeros((3, 3));
        field[(0, 2)] = 0.75;
        field[(1, 1)] = -0.1234567;
        let mut out = Vec::new();
        write_field(&mut out, &field).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = "Size of grid: 9 nodes\n\
                        (0,0): 0.000000 (0,1): 0.000000 (0,2): 0.750000 \n\
                        (1,0): 0.000000 (1,1): -0.123457 (1,2): 0.000000 \n\
                        (2,0): 0.000000 (2,1): 0.000000 (2,2): 0.000000 \n";
        assert_eq!(text, expected);
    }

    #[test]
    fn one_line_per_row() {
        let field = Field::from_elem((4, 4), 1.);
        let mut out = Vec::new();
        write_field(&mut out, &field).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Size of grid: 16 nodes");
        for line in &lines[1..] {
            assert_eq!(line.matches("1.000000").count(), 4);
        }
    }
}
