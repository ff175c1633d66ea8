use std::{
	thread,
	time::{Duration, Instant},
};

use parking_lot::Mutex;

/// Courtesy pause between requests, shared by every caller of a client.
///
/// Request starts are spaced by at least `delay`, and a request cannot start
/// earlier than `delay` after the end of the previous one.
#[derive(Debug)]
pub struct Throttle {
	delay: Duration,
	ready_at: Mutex<Option<Instant>>,
}

impl Throttle {
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			ready_at: Mutex::new(None),
		}
	}

	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Blocks until a new request may start, and books its slot.
	pub fn acquire(&self) {
		let wait = {
			let mut ready_at = self.ready_at.lock();
			let now = Instant::now();
			let slot = match *ready_at {
				Some(t) if t > now => t,
				_ => now,
			};

			*ready_at = Some(slot + self.delay);
			slot - now
		};

		if !wait.is_zero() {
			log::trace!("throttled for {wait:?}");
			thread::sleep(wait)
		}
	}

	/// Records the end of a request.
	pub fn release(&self) {
		let mut ready_at = self.ready_at.lock();
		let next = Instant::now() + self.delay;
		if ready_at.map_or(true, |t| t < next) {
			*ready_at = Some(next)
		}
	}
}
