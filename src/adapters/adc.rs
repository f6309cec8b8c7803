//! Oneshot ADC adapter for the humidity channel.
//!
//! ## Dual-target design
//!
//! - **ESP-IDF**: owns an ADC2 oneshot unit handle and reads the probe
//!   channel through the IDF oneshot API.  Raw 12-bit counts are scaled
//!   to millivolts against the 3.3 V rail so the calibration range stays
//!   in one unit everywhere.
//! - **Host/test**: reads from a shared `AtomicU32` for injection.

use crate::app::ports::AnalogPort;
use crate::error::DriverError;

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_svc::sys::{
        ESP_OK, adc_atten_t_ADC_ATTEN_DB_12, adc_bitwidth_t_ADC_BITWIDTH_12,
        adc_channel_t_ADC_CHANNEL_0, adc_oneshot_chan_cfg_t, adc_oneshot_config_channel,
        adc_oneshot_new_unit, adc_oneshot_read, adc_oneshot_unit_handle_t,
        adc_oneshot_unit_init_cfg_t, adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        adc_unit_t_ADC_UNIT_2,
    };
    use log::info;

    use super::{AnalogPort, DriverError};

    /// Full-scale input voltage at 12 dB attenuation (millivolts).
    const ADC_MAX_INPUT_MV: u32 = 3300;
    /// 12-bit conversion ceiling.
    const ADC_MAX_COUNTS: u32 = 4095;

    /// Humidity probe on ADC2 channel 0.
    pub struct HumidityAdc {
        handle: adc_oneshot_unit_handle_t,
    }

    // The raw IDF handle is not Send by default; all access happens from
    // the sampling task after init completes.
    unsafe impl Send for HumidityAdc {}

    impl HumidityAdc {
        pub fn new() -> Self {
            Self {
                handle: core::ptr::null_mut(),
            }
        }
    }

    impl AnalogPort for HumidityAdc {
        fn init(&mut self) -> Result<(), DriverError> {
            let init_cfg = adc_oneshot_unit_init_cfg_t {
                unit_id: adc_unit_t_ADC_UNIT_2,
                ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..Default::default()
            };
            // SAFETY: the handle is written once here, before the sampling
            // task starts reading.
            let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut self.handle) };
            if ret != ESP_OK as i32 {
                return Err(DriverError::InitFailed);
            }

            let chan_cfg = adc_oneshot_chan_cfg_t {
                atten: adc_atten_t_ADC_ATTEN_DB_12,
                bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
            };
            // SAFETY: handle was just created above.
            let ret = unsafe {
                adc_oneshot_config_channel(self.handle, adc_channel_t_ADC_CHANNEL_0, &chan_cfg)
            };
            if ret != ESP_OK as i32 {
                return Err(DriverError::InitFailed);
            }

            info!("ADC2 configured (CH0 = humidity probe)");
            Ok(())
        }

        fn read_raw_sample(&mut self) -> Result<u32, DriverError> {
            if self.handle.is_null() {
                return Err(DriverError::NotReady);
            }
            let mut counts: i32 = 0;
            // SAFETY: handle initialised in init(); single-task access.
            let ret = unsafe { adc_oneshot_read(self.handle, adc_channel_t_ADC_CHANNEL_0, &mut counts) };
            if ret != ESP_OK as i32 {
                return Err(DriverError::ReadFailed);
            }
            let counts = counts.max(0) as u32;
            Ok(counts * ADC_MAX_INPUT_MV / ADC_MAX_COUNTS)
        }
    }
}

#[cfg(target_os = "espidf")]
pub use esp::HumidityAdc;

#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::{AnalogPort, DriverError};

    /// Host-side stand-in: returns whatever millivolt value was injected.
    pub struct HumidityAdc {
        mv: Arc<AtomicU32>,
    }

    impl HumidityAdc {
        pub fn new() -> Self {
            Self {
                mv: Arc::new(AtomicU32::new(0)),
            }
        }

        /// Handle for injecting simulated probe voltages.
        pub fn injector(&self) -> Arc<AtomicU32> {
            Arc::clone(&self.mv)
        }
    }

    impl AnalogPort for HumidityAdc {
        fn init(&mut self) -> Result<(), DriverError> {
            Ok(())
        }

        fn read_raw_sample(&mut self) -> Result<u32, DriverError> {
            Ok(self.mv.load(Ordering::Relaxed))
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub use sim::HumidityAdc;
