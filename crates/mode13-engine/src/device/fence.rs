/// CPU-side view of GPU progress.
///
/// Every submission bumps `value` and remembers its `SubmissionIndex`;
/// `wait` blocks until that submission retired and then reports it as
/// `completed`. `completed() <= value()` always holds.
#[derive(Debug, Default)]
pub struct Fence {
    last: Option<wgpu::SubmissionIndex>,
    value: u64,
    completed: u64,
}

impl Fence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submission and returns its signal value.
    pub fn signal(&mut self, index: wgpu::SubmissionIndex) -> u64 {
        self.value += 1;
        self.last = Some(index);
        self.value
    }

    /// Blocks until the last signalled submission has finished. No timeout.
    pub fn wait(&mut self, device: &wgpu::Device) -> Result<(), wgpu::PollError> {
        if let Some(index) = self.last.take() {
            device.poll(wgpu::PollType::Wait {
                submission_index: Some(index),
                timeout: None,
            })?;
        }
        self.completed = self.value;
        Ok(())
    }

    /// Last signalled value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Last value known to have completed.
    #[inline]
    pub fn completed(&self) -> u64 {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::device::testing::headless_device;

    #[test]
    fn new_fence_starts_at_zero() {
        let f = Fence::new();
        assert_eq!(f.value(), 0);
        assert_eq!(f.completed(), 0);
    }

    #[test]
    fn wait_retires_every_signalled_submission() {
        let Some((device, queue)) = headless_device() else {
            return;
        };
        let mut f = Fence::new();

        // Waiting with nothing submitted returns immediately.
        f.wait(&device).unwrap();
        assert_eq!(f.completed(), 0);

        for expected in 1..=3 {
            let index = queue.submit(std::iter::empty::<wgpu::CommandBuffer>());
            assert_eq!(f.signal(index), expected);
            assert_eq!(f.value(), expected);
            assert_eq!(f.completed(), expected - 1);

            f.wait(&device).unwrap();
            assert_eq!(f.completed(), expected);
        }
    }
}
