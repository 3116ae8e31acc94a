use self::snapshot::{
    CpuSnapshot, DiskIoCounters, DiskUsage, GpuSnapshot, MemorySnapshot, NetworkSnapshot,
    ProcessSnapshot, SystemInfo, SystemSnapshot,
};

pub mod collector;
pub mod history;
pub mod snapshot;

pub use collector::SysinfoCollector;

/// Source of host metrics. Each method returns placeholder values rather
/// than failing when a metric is unavailable.
pub trait Collector {
    fn cpu(&mut self) -> CpuSnapshot;
    fn memory(&mut self) -> MemorySnapshot;
    fn disks(&mut self) -> Vec<DiskUsage>;
    fn disk_io(&mut self) -> DiskIoCounters;
    fn network(&mut self) -> NetworkSnapshot;
    fn gpu(&mut self) -> GpuSnapshot;
    /// At most `limit` processes, busiest first.
    fn processes(&mut self, limit: usize) -> Vec<ProcessSnapshot>;
    fn system(&mut self) -> SystemInfo;

    /// Sample everything. `None` skips process enumeration, leaving the
    /// list empty for the caller to fill from a previous sample.
    fn sample(&mut self, process_limit: Option<usize>) -> SystemSnapshot {
        SystemSnapshot {
            cpu: self.cpu(),
            memory: self.memory(),
            disks: self.disks(),
            disk_io: self.disk_io(),
            network: self.network(),
            gpu: self.gpu(),
            processes: process_limit
                .map(|limit| self.processes(limit))
                .unwrap_or_default(),
            system: self.system(),
        }
    }

    fn snapshot(&mut self, limit: usize) -> SystemSnapshot {
        self.sample(Some(limit))
    }
}
