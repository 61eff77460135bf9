//! Application-side wrapper around the processing service
//!
//! Forwards every call unchanged and keeps a record of it, so callers can see
//! exactly which parameters reached the boundary.

use firmware_types::{FirmwareVolumeService, FvHandle, Status};

/// One forwarded call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchCall {
    pub base_address: u64,
    pub length: u64,
    pub status: Status,
}

/// Recording pass-through for a [`FirmwareVolumeService`]
pub struct ServiceWrapper<S> {
    inner: S,
    calls: Vec<DispatchCall>,
}

impl<S: FirmwareVolumeService> ServiceWrapper<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Vec::new(),
        }
    }

    /// Calls forwarded so far, oldest first
    pub fn calls(&self) -> &[DispatchCall] {
        &self.calls
    }

    pub fn last_call(&self) -> Option<&DispatchCall> {
        self.calls.last()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FirmwareVolumeService> FirmwareVolumeService for ServiceWrapper<S> {
    fn process_firmware_volume(
        &mut self,
        base_address: u64,
        length: u64,
    ) -> Result<FvHandle, Status> {
        let outcome = self.inner.process_firmware_volume(base_address, length);
        self.calls.push(DispatchCall {
            base_address,
            length,
            status: match outcome {
                Ok(_) => Status::Success,
                Err(status) => status,
            },
        });
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<FvHandle, Status>);

    impl FirmwareVolumeService for Fixed {
        fn process_firmware_volume(&mut self, _: u64, _: u64) -> Result<FvHandle, Status> {
            self.0
        }
    }

    #[test]
    fn test_forwards_unchanged_and_records() {
        let mut wrapper = ServiceWrapper::new(Fixed(Ok(FvHandle(7))));
        assert_eq!(wrapper.process_firmware_volume(0x1000, 0x2000), Ok(FvHandle(7)));

        wrapper.inner_mut().0 = Err(Status::Unsupported);
        assert_eq!(
            wrapper.process_firmware_volume(0x1000, u64::from(u32::MAX)),
            Err(Status::Unsupported)
        );

        assert_eq!(
            wrapper.calls(),
            &[
                DispatchCall {
                    base_address: 0x1000,
                    length: 0x2000,
                    status: Status::Success,
                },
                DispatchCall {
                    base_address: 0x1000,
                    length: 0xFFFF_FFFF,
                    status: Status::Unsupported,
                },
            ]
        );
        assert_eq!(wrapper.last_call().map(|c| c.status), Some(Status::Unsupported));
    }
}
