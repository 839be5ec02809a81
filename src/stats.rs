/// Per-session game counters.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Stats {
    pub games_started: u64,
    pub games_won: u64,
}

impl Stats {
    pub fn record_start(&mut self) {
        self.games_started += 1;
    }

    pub fn record_win(&mut self) {
        self.games_won += 1;
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_started == 0 {
            0.0
        } else {
            self.games_won as f64 / self.games_started as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_over_started_games() {
        let mut stats = Stats::default();
        assert_eq!(stats.win_rate(), 0.0);

        for _ in 0..4 {
            stats.record_start();
        }
        stats.record_win();
        assert_eq!(stats.games_started, 4);
        assert_eq!(stats.win_rate(), 0.25);
    }
}
