use anyhow::Result;

/// Runs `f` with validation and out-of-memory errors captured instead of
/// reaching the device's uncaptured-error handler (which panics).
///
/// Returns the first captured error, validation before out-of-memory.
pub(crate) fn captured<T>(
    device: &wgpu::Device,
    f: impl FnOnce() -> T,
) -> (T, Option<wgpu::Error>) {
    let oom = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    let validation = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let value = f();

    // Scopes pop innermost first.
    let validation = pollster::block_on(validation.pop());
    let oom = pollster::block_on(oom.pop());

    (value, validation.or(oom))
}

/// Like [`captured`], but any captured error becomes `Err`.
pub(crate) fn checked<T>(device: &wgpu::Device, f: impl FnOnce() -> T) -> Result<T> {
    match captured(device, f) {
        (value, None) => Ok(value),
        (_, Some(err)) => Err(anyhow::anyhow!("{err}")),
    }
}
