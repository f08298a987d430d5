use std::cell::RefCell;
use std::rc::Rc;

/// Something that can run a task once after a delay. Dropping the returned
/// handle must cancel the task if it has not fired yet.
pub trait TimerHost {
    type Pending;
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Pending;
}

/// Trailing-edge debounce: each `call` cancels the previously scheduled run and
/// schedules a fresh one, so only the last call of a burst executes.
pub struct Debouncer<H: TimerHost> {
    host: H,
    delay_ms: u32,
    task: Rc<dyn Fn()>,
    pending: RefCell<Option<H::Pending>>,
}

impl<H: TimerHost> Debouncer<H> {
    pub fn new(host: H, delay_ms: u32, task: impl Fn() + 'static) -> Self {
        Debouncer {
            host,
            delay_ms,
            task: Rc::new(task),
            pending: RefCell::new(None),
        }
    }

    pub fn call(&self) {
        // Drop the old handle first so its task can never run after this point.
        self.pending.borrow_mut().take();
        let task = Rc::clone(&self.task);
        let handle = self.host.schedule(self.delay_ms, Box::new(move || task()));
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}

/// Browser timers. `gloo`'s `Timeout` clears itself when dropped.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

#[cfg(target_arch = "wasm32")]
impl TimerHost for BrowserTimers {
    type Pending = gloo::timers::callback::Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Pending {
        gloo::timers::callback::Timeout::new(delay_ms, task)
    }
}
