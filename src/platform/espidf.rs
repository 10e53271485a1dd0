//! ESP-IDF realizations of the node capabilities.
//!
//! Thin wrappers over the FreeRTOS / ESP-IDF C API; business logic stays
//! in the core modules. Only compiled for `target_os = "espidf"`.

use esp_idf_svc::sys;

use crate::event::{EventBits, WakeSignal};
use crate::indicator::{Indicator, IndicatorDriver, IndicatorError, PinConfig};

/// FreeRTOS event groups carry 24 usable bits; the high byte of the
/// 32-bit word is reserved by the kernel.
const EVENT_GROUP_MASK: u32 = 0x00FF_FFFF;

const WAIT_FOREVER: sys::TickType_t = sys::TickType_t::MAX;

/// Wake signal backed by a FreeRTOS event group.
///
/// Event groups are level-triggered: setting an already-set bit is a
/// no-op, and `wait_any` clears the returned bits on exit. That is
/// exactly the coalescing contract of [`WakeSignal`].
///
/// `post` uses the task-context call; the sampling engine's callback
/// runs in its driver task, not a hardware ISR, matching the original
/// sensor-controller delivery path.
pub struct EspEventSignal {
    handle: sys::EventGroupHandle_t,
}

// SAFETY: the event group handle is an opaque kernel object; every call
// through it is itself thread- and ISR-aware.
unsafe impl Send for EspEventSignal {}
unsafe impl Sync for EspEventSignal {}

impl EspEventSignal {
    /// Allocate a fresh event group. Panics only if the kernel heap is
    /// exhausted during bring-up, before the loop ever runs.
    pub fn new() -> Self {
        // SAFETY: plain constructor call.
        let handle = unsafe { sys::xEventGroupCreate() };
        assert!(!handle.is_null(), "event group allocation failed");
        Self { handle }
    }
}

impl Default for EspEventSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeSignal for EspEventSignal {
    fn post(&self, bits: EventBits) {
        // SAFETY: handle is valid for the process lifetime.
        unsafe {
            sys::xEventGroupSetBits(self.handle, bits.bits() & EVENT_GROUP_MASK);
        }
    }

    fn wait_any(&self, mask: EventBits) -> EventBits {
        // SAFETY: handle is valid; clear-on-exit, any-bit, no timeout.
        let fired = unsafe {
            sys::xEventGroupWaitBits(
                self.handle,
                mask.bits() & EVENT_GROUP_MASK,
                1, // clear on exit
                0, // any bit suffices
                WAIT_FOREVER,
            )
        };
        EventBits::from_bits(fired & mask.bits() & EVENT_GROUP_MASK)
    }
}

/// An opened GPIO output pin.
///
/// The driven level is cached: the pin is consumer-exclusive, so the
/// cache cannot go stale and no read-back of the pad is needed.
pub struct EspIndicatorPin {
    pin: i32,
    level: bool,
}

impl Indicator for EspIndicatorPin {
    fn get_output(&self) -> bool {
        self.level
    }

    fn set_output(&mut self, high: bool) {
        // SAFETY: the pin was configured as a push-pull output in open().
        unsafe {
            sys::gpio_set_level(self.pin, high as u32);
        }
        self.level = high;
    }
}

/// GPIO-based indicator driver.
#[derive(Default)]
pub struct EspIndicatorDriver;

impl IndicatorDriver for EspIndicatorDriver {
    type Pin = EspIndicatorPin;

    fn open(&mut self, config: PinConfig) -> Result<Self::Pin, IndicatorError> {
        let gpio_conf = sys::gpio_config_t {
            pin_bit_mask: 1u64 << config.pin,
            mode: sys::gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: sys::gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: sys::gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: sys::gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };

        // SAFETY: config struct is fully initialized.
        let err = unsafe { sys::gpio_config(&gpio_conf) };
        if err != sys::ESP_OK {
            return Err(IndicatorError::Hardware);
        }

        let mut pin = EspIndicatorPin {
            pin: config.pin as i32,
            level: !config.initial_high,
        };
        pin.set_output(config.initial_high);
        Ok(pin)
    }
}

/// Microsecond timestamp for [`node_log!`](crate::node_log) call sites.
#[inline]
pub fn timestamp_us() -> i64 {
    // SAFETY: esp_timer is initialized by the runtime before user code.
    unsafe { sys::esp_timer_get_time() }
}
