/// Interpolates a scroll position over a fixed duration.
///
/// Time is the elapsed time since the tween started, in seconds, so a tween is a pure value that
/// can be sampled from any frame loop.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl Tween {
    /// A non-positive or non-finite `duration` yields a tween that is done immediately.
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: if duration.is_finite() { duration.max(0.0) } else { 0.0 },
            easing,
        }
    }

    pub fn is_done(&self, elapsed: f32) -> bool {
        elapsed >= self.duration
    }

    pub fn sample(&self, elapsed: f32) -> f32 {
        if self.is_done(elapsed) {
            return self.to;
        }
        let t = (elapsed / self.duration).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);
        self.from + (self.to - self.from) * eased
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    #[default]
    Linear,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}
