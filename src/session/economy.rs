//! Lives and credits

use serde::{Deserialize, Serialize};

/// Player economy. Only the session writes to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    lives: u8,
    max_lives: u8,
    credits: u32,
}

impl Economy {
    pub fn new(max_lives: u8) -> Self {
        let max_lives = max_lives.max(1);
        Self {
            lives: max_lives,
            max_lives,
            credits: 0,
        }
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn max_lives(&self) -> u8 {
        self.max_lives
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn earn(&mut self) {
        self.credits = self.credits.saturating_add(1);
    }

    /// Spend `cost` credits. Returns false, leaving the balance untouched, if
    /// there are not enough.
    pub fn spend(&mut self, cost: u32) -> bool {
        match self.credits.checked_sub(cost) {
            Some(rest) => {
                self.credits = rest;
                true
            }
            None => false,
        }
    }

    /// Take a life. Returns true when that was the last one; lives are then
    /// refilled for the fresh attempt at the world.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.lives = self.max_lives;
            return true;
        }
        false
    }
}

impl Default for Economy {
    fn default() -> Self {
        Self::new(crate::consts::MAX_LIVES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spend_with_no_credits() {
        let mut economy = Economy::default();
        assert!(!economy.spend(1));
        assert_eq!(economy.credits(), 0);
        economy.earn();
        assert!(economy.spend(1));
        assert_eq!(economy.credits(), 0);
    }

    #[test]
    fn test_third_life_lost_refills() {
        let mut economy = Economy::default();
        assert!(!economy.lose_life());
        assert!(!economy.lose_life());
        assert_eq!(economy.lives(), 1);
        assert!(economy.lose_life());
        assert_eq!(economy.lives(), 3);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Earn,
        Spend,
        LoseLife,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Earn), Just(Op::Spend), Just(Op::LoseLife)]
    }

    proptest! {
        #[test]
        fn prop_credits_track_earn_and_spend(ops in prop::collection::vec(op(), 0..200)) {
            let mut economy = Economy::default();
            let mut expected: u32 = 0;
            for op in ops {
                match op {
                    Op::Earn => {
                        economy.earn();
                        expected += 1;
                    }
                    Op::Spend => {
                        let ok = economy.spend(1);
                        prop_assert_eq!(ok, expected > 0);
                        expected = expected.saturating_sub(1);
                    }
                    Op::LoseLife => {
                        economy.lose_life();
                    }
                }
                prop_assert_eq!(economy.credits(), expected);
                prop_assert!(economy.lives() >= 1 && economy.lives() <= 3);
            }
        }
    }
}
