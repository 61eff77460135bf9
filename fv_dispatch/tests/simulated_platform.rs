//! Dispatch against the simulated processing service

use firmware_types::{FvHandle, Status};
use fv_dispatch::{
    dispatch_firmware_volume, DispatchError, DispatchMode, ServiceWrapper, FUZZ_LENGTH,
};
use sim_firmware::{
    EmptyHandoff, FirmwareVolumeBuilder, HandoffList, HobListBuilder, SimulatedDxe,
    SimulatedMemory, SimulatedPlatform, STANDARD_FV_BASE, STANDARD_FV_LENGTH,
};

const BASE: u64 = 0x9000_0000;

fn platform_with(image: Vec<u8>, hob_length: u64) -> (SimulatedMemory, HandoffList) {
    let mut memory = SimulatedMemory::new();
    memory.map(BASE, image);
    let handoff = HandoffList::new(HobListBuilder::new().firmware_volume(BASE, hob_length).build())
        .unwrap();
    (memory, handoff)
}

#[test]
fn fuzz_length_is_rejected_by_the_service() {
    let platform = SimulatedPlatform::standard().unwrap();
    let mut dxe = platform.dxe();

    let result = dispatch_firmware_volume(
        DispatchMode::Fuzz,
        &platform.handoff,
        &platform.memory,
        &mut dxe,
    )
    .unwrap();

    assert_eq!(result.base_address, STANDARD_FV_BASE);
    assert_eq!(result.length, FUZZ_LENGTH);
    assert_eq!(result.status, Status::InvalidParameter);
    assert_eq!(result.handle, None);
    assert_eq!(dxe.calls(), 1);
    assert!(dxe.processed().is_empty());
}

#[test]
fn declared_length_produces_a_handle() {
    let platform = SimulatedPlatform::standard().unwrap();
    let mut dxe = platform.dxe();

    let result = dispatch_firmware_volume(
        DispatchMode::Normal,
        &platform.handoff,
        &platform.memory,
        &mut dxe,
    )
    .unwrap();

    assert_eq!(result.length, STANDARD_FV_LENGTH);
    assert_eq!(result.status, Status::Success);
    assert_eq!(result.handle, Some(FvHandle(1)));
    assert_eq!(dxe.processed().len(), 1);
    assert_eq!(dxe.processed()[0].length, STANDARD_FV_LENGTH);
}

#[test]
fn wrapper_records_both_modes_in_order() {
    let platform = SimulatedPlatform::standard().unwrap();
    let mut service = ServiceWrapper::new(platform.dxe());

    for mode in [DispatchMode::Fuzz, DispatchMode::Normal] {
        dispatch_firmware_volume(mode, &platform.handoff, &platform.memory, &mut service)
            .unwrap();
    }

    let calls = service.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        (calls[0].length, calls[0].status),
        (FUZZ_LENGTH, Status::InvalidParameter)
    );
    assert_eq!(
        (calls[1].length, calls[1].status),
        (STANDARD_FV_LENGTH, Status::Success)
    );
    assert_eq!(service.inner().calls(), 2);
}

#[test]
fn missing_record_never_reaches_the_service() {
    let platform = SimulatedPlatform::standard().unwrap();
    let mut dxe = platform.dxe();

    let err = dispatch_firmware_volume(DispatchMode::Normal, &EmptyHandoff, &platform.memory, &mut dxe)
        .unwrap_err();

    assert!(matches!(err, DispatchError::NoFirmwareVolumeFound));
    assert_eq!(dxe.calls(), 0);
}

#[test]
fn corrupt_header_is_reported_as_status() {
    let image = FirmwareVolumeBuilder::new(0x2000).corrupt_checksum().build();
    let (memory, handoff) = platform_with(image, 0x2000);
    let mut dxe = SimulatedDxe::new(&memory);

    let result = dispatch_firmware_volume(DispatchMode::Normal, &handoff, &memory, &mut dxe).unwrap();

    assert_eq!(result.status, Status::VolumeCorrupted);
    assert_eq!(result.handle, None);
}

#[test]
fn normal_mode_forwards_an_oversized_declaration() {
    let image = FirmwareVolumeBuilder::new(0x2000)
        .declared_length(0x8000)
        .build();
    let (memory, handoff) = platform_with(image, 0x2000);
    let mut dxe = SimulatedDxe::new(&memory);

    let result = dispatch_firmware_volume(DispatchMode::Normal, &handoff, &memory, &mut dxe).unwrap();

    assert_eq!(result.length, 0x8000);
    assert_eq!(result.status, Status::InvalidParameter);
}
