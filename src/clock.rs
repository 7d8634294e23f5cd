use std::time::Instant;

/// Time source for the rate gate.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockClock;
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let t1 = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.now() > t1);
    }

    #[test]
    fn test_mock_clock_advance_and_set() {
        let start = Instant::now();
        let clock = MockClock::new(start);
        let shared = clock.clone();

        shared.advance(Duration::from_secs(3));
        assert_eq!(clock.now(), start + Duration::from_secs(3));

        clock.set(start);
        assert_eq!(shared.now(), start);
    }
}
