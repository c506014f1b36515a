use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::driver::Trace;
use crate::stats::Histogram;

fn create<P: AsRef<Path>>(path: P) -> io::Result<BufWriter<std::fs::File>> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    Ok(BufWriter::new(file))
}

// one magnitude per line
pub fn write_magnitudes<W: Write>(out: &mut W, magnitudes: &[f64]) -> io::Result<()> {
    for m in magnitudes {
        writeln!(out, "{}", m)?;
    }
    out.flush()
}

// `t block x v` for every block at every recorded step
pub fn write_trace<W: Write>(out: &mut W, trace: &Trace) -> io::Result<()> {
    for (i, block) in trace.blocks.iter().enumerate() {
        for (&(t, x), &(_, v)) in block.position.iter().zip(&block.velocity) {
            writeln!(out, "{} {} {} {}", t, i, x, v)?;
        }
    }
    out.flush()
}

pub fn dump_magnitudes<P: AsRef<Path>>(path: P, magnitudes: &[f64]) -> io::Result<()> {
    write_magnitudes(&mut create(path)?, magnitudes)
}

pub fn dump_trace<P: AsRef<Path>>(path: P, trace: &Trace) -> io::Result<()> {
    write_trace(&mut create(path)?, trace)
}

pub fn print_histogram(histogram: &Histogram) {
    println!("{:?}", histogram.counts);
    println!("{}", histogram.total());
    for (edge, y) in histogram.edges().iter().zip(histogram.log_counts()) {
        println!("{:6.2} {:.4}", edge, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::BlockTrace;

    #[test]
    fn trace_lines_are_block_major() {
        let trace = Trace {
            blocks: vec![
                BlockTrace { position: vec![(0.0, 1.0), (0.5, 2.0)], velocity: vec![(0.0, 0.0), (0.5, 3.0)] },
                BlockTrace { position: vec![(0.0, -1.0), (0.5, -1.0)], velocity: vec![(0.0, 0.0), (0.5, 0.0)] },
            ],
            moments: Vec::new(),
        };
        let mut buf = Vec::new();
        write_trace(&mut buf, &trace).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "0 0 1 0\n0.5 0 2 3\n0 1 -1 0\n0.5 1 -1 0\n");
    }

    #[test]
    fn magnitudes_one_per_line() {
        let mut buf = Vec::new();
        write_magnitudes(&mut buf, &[1.5, -0.25]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1.5\n-0.25\n");
    }
}
