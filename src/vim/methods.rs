//! Per-kind method tables
//!
//! The property collector enumerates data properties only; the operations a
//! managed object exposes are SDK metadata and never cross the wire. These
//! tables carry that metadata for the kinds the viewer supports, method
//! names spelled as in the vim25 API reference. The first four entries of
//! each table are the ManagedEntity methods every kind inherits.

use super::MobKind;

const DATACENTER: &[&str] = &[
    "Destroy_Task",
    "Reload",
    "Rename_Task",
    "setCustomValue",
    "PowerOnMultiVM_Task",
    "QueryConnectionInfo",
    "QueryConnectionInfoViaSpec",
    "QueryDatacenterConfigOptionDescriptor",
    "ReconfigureDatacenter_Task",
];

const DATASTORE: &[&str] = &[
    "Destroy_Task",
    "Reload",
    "Rename_Task",
    "setCustomValue",
    "DatastoreEnterMaintenanceMode",
    "DatastoreExitMaintenanceMode_Task",
    "DestroyDatastore",
    "RefreshDatastore",
    "RefreshDatastoreStorageInfo",
    "RenameDatastore",
    "UpdateVirtualMachineFiles_Task",
    "UpdateVVolVirtualMachineFiles_Task",
];

const FOLDER: &[&str] = &[
    "Destroy_Task",
    "Reload",
    "Rename_Task",
    "setCustomValue",
    "AddStandaloneHost_Task",
    "BatchAddHostsToCluster_Task",
    "BatchAddStandaloneHosts_Task",
    "CreateCluster",
    "CreateClusterEx",
    "CreateDatacenter",
    "CreateDVS_Task",
    "CreateFolder",
    "CreateStoragePod",
    "CreateVM_Task",
    "MoveIntoFolder_Task",
    "RegisterVM_Task",
    "UnregisterAndDestroy_Task",
];

const NETWORK: &[&str] = &[
    "Destroy_Task",
    "Reload",
    "Rename_Task",
    "setCustomValue",
    "DestroyNetwork",
];

const RESOURCE_POOL: &[&str] = &[
    "Destroy_Task",
    "Reload",
    "Rename_Task",
    "setCustomValue",
    "CreateChildVM_Task",
    "CreateResourcePool",
    "CreateVApp",
    "DestroyChildren",
    "ImportVApp",
    "MoveIntoResourcePool",
    "QueryResourceConfigOption",
    "RefreshRuntime",
    "RegisterChildVM_Task",
    "UpdateChildResourceConfiguration",
    "UpdateConfig",
];

const VIRTUAL_MACHINE: &[&str] = &[
    "Destroy_Task",
    "Reload",
    "Rename_Task",
    "setCustomValue",
    "AcquireMksTicket",
    "AcquireTicket",
    "AnswerVM",
    "AttachDisk_Task",
    "CheckCustomizationSpec",
    "CloneVM_Task",
    "ConsolidateVMDisks_Task",
    "CreateScreenshot_Task",
    "CreateSecondaryVM_Task",
    "CreateSnapshot_Task",
    "CreateSnapshotEx_Task",
    "CustomizeVM_Task",
    "DefragmentAllDisks",
    "DetachDisk_Task",
    "DisableSecondaryVM_Task",
    "DropConnections",
    "EnableSecondaryVM_Task",
    "EstimateStorageForConsolidateSnapshots_Task",
    "ExportVm",
    "ExtractOvfEnvironment",
    "InstantClone_Task",
    "MakePrimaryVM_Task",
    "MarkAsTemplate",
    "MarkAsVirtualMachine",
    "MigrateVM_Task",
    "MountToolsInstaller",
    "PowerOffVM_Task",
    "PowerOnVM_Task",
    "PromoteDisks_Task",
    "QueryChangedDiskAreas",
    "QueryFaultToleranceCompatibility",
    "QueryUnownedFiles",
    "RebootGuest",
    "ReconfigVM_Task",
    "RefreshStorageInfo",
    "RelocateVM_Task",
    "RemoveAllSnapshots_Task",
    "ResetGuestInformation",
    "ResetVM_Task",
    "RevertToCurrentSnapshot_Task",
    "SendNMI",
    "SetDisplayTopology",
    "ShutdownGuest",
    "StandbyGuest",
    "StartRecording_Task",
    "StopRecording_Task",
    "SuspendVM_Task",
    "TerminateFaultTolerantVM_Task",
    "TerminateVM",
    "TurnOffFaultToleranceForVM_Task",
    "UnmountToolsInstaller",
    "UnregisterVM",
    "UpgradeTools_Task",
    "UpgradeVM_Task",
];

/// Full method table for a kind
pub fn for_kind(kind: MobKind) -> &'static [&'static str] {
    match kind {
        MobKind::Datacenter => DATACENTER,
        MobKind::Datastore => DATASTORE,
        MobKind::Folder => FOLDER,
        MobKind::Network => NETWORK,
        MobKind::ResourcePool => RESOURCE_POOL,
        MobKind::VirtualMachine => VIRTUAL_MACHINE,
    }
}
