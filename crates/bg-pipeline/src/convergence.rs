//! Convergence metric over the solver's force/moment table.

use std::path::Path;

/// Window of trailing samples the metric looks at.
const WINDOW: usize = 10;

/// One row of the force table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceSample {
    pub t: f64,
    pub cd: f64,
    pub cl: f64,
}

/// Parse the fixed-format Efforts table: 2 header lines, then
/// whitespace-separated columns `[time, cd, cl, ...]`. Returns `None`
/// when any data row is malformed.
pub fn parse_efforts(content: &str) -> Option<Vec<ForceSample>> {
    let mut samples = Vec::new();
    for line in content.lines().skip(2) {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let t = fields.next()?.parse().ok()?;
        let cd = fields.next()?.parse().ok()?;
        let cl = fields.next()?.parse().ok()?;
        samples.push(ForceSample { t, cd, cl });
    }
    Some(samples)
}

/// Max of the standard deviations of the last `WINDOW` lift and drag
/// coefficients. Infinite when there are no samples: not converged.
pub fn convergence_metric(samples: &[ForceSample]) -> f64 {
    if samples.is_empty() {
        return f64::INFINITY;
    }
    let tail = &samples[samples.len().saturating_sub(WINDOW)..];
    let cd_std = std_dev(tail.iter().map(|s| s.cd));
    let cl_std = std_dev(tail.iter().map(|s| s.cl));
    cd_std.max(cl_std)
}

/// Read and score a results file; missing or malformed reports infinite.
pub fn has_converged(path: &Path) -> f64 {
    let Ok(content) = std::fs::read_to_string(path) else {
        return f64::INFINITY;
    };
    match parse_efforts(&content) {
        Some(samples) => convergence_metric(&samples),
        None => f64::INFINITY,
    }
}

/// Export samples as CSV with the `t,cd,cl` header.
pub fn export_csv(samples: &[ForceSample], path: &Path) -> std::io::Result<()> {
    let mut out = String::from("t,cd,cl\n");
    for s in samples {
        out.push_str(&format!("{},{},{}\n", s.t, s.cd, s.cl));
    }
    std::fs::write(path, out)
}

fn std_dev(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let n = values.clone().count();
    if n == 0 {
        return f64::INFINITY;
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let var = values.map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(f64, f64, f64)]) -> String {
        let mut s = String::from("# Efforts\n# t cd cl mx my mz\n");
        for (t, cd, cl) in rows {
            s.push_str(&format!("{t:>12.6} {cd:>12.6} {cl:>12.6} 0.0 0.0 0.0\n"));
        }
        s
    }

    #[test]
    fn constant_tail_scores_zero() {
        let rows: Vec<_> = (0..20).map(|i| (i as f64, 0.02, 0.8)).collect();
        let samples = parse_efforts(&table(&rows)).unwrap();
        assert!(convergence_metric(&samples) < 1e-12);
    }

    #[test]
    fn diverging_tail_scores_large() {
        let rows: Vec<_> = (0..20).map(|i| (i as f64, 0.02, (i * i) as f64)).collect();
        let samples = parse_efforts(&table(&rows)).unwrap();
        assert!(convergence_metric(&samples) > 10.0);
    }

    #[test]
    fn only_trailing_window_counts() {
        // wild history, flat last 10
        let mut rows: Vec<_> = (0..10).map(|i| (i as f64, (i * 100) as f64, 0.0)).collect();
        rows.extend((10..20).map(|i| (i as f64, 0.02, 0.8)));
        let samples = parse_efforts(&table(&rows)).unwrap();
        assert!(convergence_metric(&samples) < 1e-12);
    }

    #[test]
    fn empty_table_is_not_converged() {
        let samples = parse_efforts(&table(&[])).unwrap();
        assert_eq!(convergence_metric(&samples), f64::INFINITY);
    }

    #[test]
    fn malformed_rows_reject_the_table() {
        let mut content = table(&[(0.0, 0.02, 0.8)]);
        content.push_str("not a number row\n");
        assert!(parse_efforts(&content).is_none());
    }

    #[test]
    fn missing_file_reports_infinite() {
        let metric = has_converged(Path::new("/nonexistent/Efforts.txt"));
        assert!(metric.is_infinite());
    }

    #[test]
    fn csv_export_has_header() {
        let dir = std::env::temp_dir();
        let path = dir.join("bg_pipeline_csv_export_test.csv");
        let samples = [ForceSample {
            t: 0.5,
            cd: 0.02,
            cl: 0.8,
        }];
        export_csv(&samples, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "t,cd,cl\n0.5,0.02,0.8\n");
    }
}
