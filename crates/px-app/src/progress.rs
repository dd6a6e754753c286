use std::io::Write;

/// Compteur de progression du préprocess.
///
/// Écrit sur stderr ; stdout est réservé aux frames et aux séquences
/// de contrôle du terminal.
pub struct Progress {
    total: Option<u64>,
    count: u64,
}

impl Progress {
    /// Démarre un compteur. `total` est le compte annoncé, indicatif.
    #[must_use]
    pub fn new(total: Option<u64>) -> Self {
        eprintln!("processing frames...");
        Self { total, count: 0 }
    }

    /// Une frame rendue de plus ; réécrit la ligne de progression.
    pub fn tick(&mut self) {
        self.count += 1;
        match self.total {
            Some(total) if total > 0 => eprint!("\r{}/{total}", self.count),
            _ => eprint!("\r{}", self.count),
        }
        let _ = std::io::stderr().flush();
    }

    /// Frames rendues jusqu'ici.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Termine la ligne de progression.
    pub fn finish(&self) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_counts_past_the_advisory_total() {
        // Le compte annoncé n'est qu'indicatif : le compteur le dépasse
        // sans broncher si le flux est plus long qu'annoncé.
        let mut progress = Progress::new(Some(2));
        for _ in 0..3 {
            progress.tick();
        }
        assert_eq!(progress.count(), 3);
        progress.finish();
    }

    #[test]
    fn unknown_total_still_counts() {
        let mut progress = Progress::new(None);
        progress.tick();
        assert_eq!(progress.count(), 1);
    }
}
