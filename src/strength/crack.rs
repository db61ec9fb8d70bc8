//! Crack-time projections under fixed attacker models.

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackerModel {
    Laptop,
    GpuCluster,
    Supercomputer,
}

impl AttackerModel {
    pub const ALL: [AttackerModel; 3] = [
        AttackerModel::Laptop,
        AttackerModel::GpuCluster,
        AttackerModel::Supercomputer,
    ];

    pub fn guesses_per_second(self) -> f64 {
        match self {
            AttackerModel::Laptop => 1e6,
            AttackerModel::GpuCluster => 1e9,
            AttackerModel::Supercomputer => 1e12,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttackerModel::Laptop => "Laptop",
            AttackerModel::GpuCluster => "GPU Cluster",
            AttackerModel::Supercomputer => "Supercomputer",
        }
    }
}

/// Seconds to exhaust `2^bits` guesses under each model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrackTimeEstimate {
    pub laptop: f64,
    pub gpu_cluster: f64,
    pub supercomputer: f64,
}

impl CrackTimeEstimate {
    pub fn from_bits(bits: f64) -> Self {
        let space = 2f64.powf(bits);
        Self {
            laptop: space / AttackerModel::Laptop.guesses_per_second(),
            gpu_cluster: space / AttackerModel::GpuCluster.guesses_per_second(),
            supercomputer: space / AttackerModel::Supercomputer.guesses_per_second(),
        }
    }

    pub fn seconds(&self, model: AttackerModel) -> f64 {
        match model {
            AttackerModel::Laptop => self.laptop,
            AttackerModel::GpuCluster => self.gpu_cluster,
            AttackerModel::Supercomputer => self.supercomputer,
        }
    }

    /// `(label, formatted duration)` for each model, fastest attacker last.
    pub fn formatted(&self) -> [(&'static str, String); 3] {
        AttackerModel::ALL.map(|m| (m.label(), format_crack_time(self.seconds(m))))
    }
}

pub fn format_crack_time(seconds: f64) -> String {
    if seconds < 1.0 {
        return "< 1 sec".to_string();
    }
    if seconds < MINUTE {
        return format!("{} sec", seconds.round());
    }
    if seconds < HOUR {
        return format!("{} min", (seconds / MINUTE).round());
    }
    if seconds < DAY {
        return format!("{} hours", (seconds / HOUR).round());
    }
    if seconds < YEAR {
        return format!("{} days", (seconds / DAY).round());
    }

    let years = seconds / YEAR;
    if years < 1e3 {
        format!("{} years", years.round())
    } else if years < 1e6 {
        format!("{:.1}k years", years / 1e3)
    } else if years < 1e9 {
        format!("{:.1}m years", years / 1e6)
    } else if years < 1e12 {
        format!("{:.1}b years", years / 1e9)
    } else {
        "Eternity".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales() {
        assert_eq!(format_crack_time(0.0), "< 1 sec");
        assert_eq!(format_crack_time(0.999), "< 1 sec");
        assert_eq!(format_crack_time(1.0), "1 sec");
        assert_eq!(format_crack_time(59.4), "59 sec");
        assert_eq!(format_crack_time(90.0), "2 min");
        assert_eq!(format_crack_time(2.0 * HOUR), "2 hours");
        assert_eq!(format_crack_time(3.0 * DAY), "3 days");
        assert_eq!(format_crack_time(5.0 * YEAR), "5 years");
        assert_eq!(format_crack_time(2_500.0 * YEAR), "2.5k years");
        assert_eq!(format_crack_time(3.4e6 * YEAR), "3.4m years");
        assert_eq!(format_crack_time(7.0e9 * YEAR), "7.0b years");
        assert_eq!(format_crack_time(1e13 * YEAR), "Eternity");
        assert_eq!(format_crack_time(f64::INFINITY), "Eternity");
    }

    #[test]
    fn models_divide_the_space() {
        let est = CrackTimeEstimate::from_bits(40.0);
        let space = 2f64.powi(40);
        assert_eq!(est.laptop, space / 1e6);
        assert_eq!(est.gpu_cluster, space / 1e9);
        assert_eq!(est.supercomputer, space / 1e12);
        assert!(est.laptop > est.gpu_cluster && est.gpu_cluster > est.supercomputer);
    }

    #[test]
    fn zero_bits_is_instant() {
        let est = CrackTimeEstimate::from_bits(0.0);
        for (_, text) in est.formatted() {
            assert_eq!(text, "< 1 sec");
        }
    }

    #[test]
    fn huge_entropy_is_eternity() {
        let est = CrackTimeEstimate::from_bits(2000.0);
        assert_eq!(format_crack_time(est.supercomputer), "Eternity");
    }
}
