fn main() {
    // Propagate the ESP-IDF build environment (sdkconfig, linker args)
    // when targeting the device. Host builds skip this entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
