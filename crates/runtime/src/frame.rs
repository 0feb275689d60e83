use foundation::time::Time;

/// Largest delta a single frame may report; longer gaps (tab in background,
/// debugger pause) are treated as one slow frame.
pub const MAX_FRAME_DT_S: f64 = 0.1;

/// Frame metadata handed to every per-frame update.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time since the previous frame (seconds).
    pub dt_s: f64,
    /// Host time at the start of the frame.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }
}

/// Turns display-refresh timestamps into [`Frame`]s.
///
/// The first tick reports `dt_s == 0`. Timestamps that go backwards are
/// treated as a zero-length frame.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    last: Option<Frame>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now: Time) -> Frame {
        let frame = match self.last {
            None => Frame {
                index: 0,
                dt_s: 0.0,
                time: now,
            },
            Some(prev) => Frame {
                index: prev.index + 1,
                dt_s: now.seconds_since(prev.time).clamp(0.0, MAX_FRAME_DT_S),
                time: now,
            },
        };
        self.last = Some(frame);
        frame
    }

    /// The most recent frame, or a zero frame before the first tick.
    pub fn current(&self) -> Frame {
        self.last.unwrap_or(Frame {
            index: 0,
            dt_s: 0.0,
            time: Time(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, FrameClock, MAX_FRAME_DT_S};
    use foundation::time::Time;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, 1.0 / 60.0);
        let b = Frame::new(10, 1.0 / 60.0);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(10.0 / 60.0));
    }

    #[test]
    fn clock_reports_deltas_between_timestamps() {
        let mut clock = FrameClock::new();
        let f0 = clock.tick(Time(1.0));
        assert_eq!(f0.index, 0);
        assert_eq!(f0.dt_s, 0.0);

        let f1 = clock.tick(Time(1.05));
        assert_eq!(f1.index, 1);
        assert!((f1.dt_s - 0.05).abs() < 1e-12);
        assert_eq!(clock.current(), f1);
    }

    #[test]
    fn clock_clamps_long_and_backwards_gaps() {
        let mut clock = FrameClock::new();
        clock.tick(Time(1.0));
        assert_eq!(clock.tick(Time(9.0)).dt_s, MAX_FRAME_DT_S);
        assert_eq!(clock.tick(Time(8.0)).dt_s, 0.0);
    }
}
