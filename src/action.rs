/// Panels that can be shown or hidden independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Cpu,
    Memory,
    Network,
    Disk,
    Gpu,
    Processes,
}

/// All user intents (actions) that can be performed in the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,

    /// Move selection up
    MoveUp,

    /// Move selection down
    MoveDown,

    /// Move selection one page up
    PageUp,

    /// Move selection one page down
    PageDown,

    /// Jump to the first process
    Top,

    /// Jump to the last process
    Bottom,

    /// Start process search/filter input
    StartSearch,

    /// Append one character to process search input
    SearchChar(char),

    /// Delete one character from process search input
    SearchBackspace,

    /// Apply process search input as the filter
    ConfirmSearch,

    /// Cancel process search input
    CancelSearch,

    /// Close help, or clear the filter when nothing is open
    Cancel,

    /// Show or hide one panel
    TogglePanel(Panel),

    /// Toggle graphs display
    ToggleGraphs,

    /// Toggle process tree view
    ToggleTree,

    /// Switch to next process sorting key
    CycleSort,

    /// Invert the process sort direction
    ReverseSort,

    /// Switch to next color scheme
    NextTheme,

    /// Switch to previous color scheme
    PrevTheme,

    /// Shorten the refresh interval
    Faster,

    /// Lengthen the refresh interval
    Slower,

    /// Restore default view state and clear history
    ResetView,

    /// Open termination confirmation for the selected process
    RequestKill,

    /// Confirm process termination
    ConfirmKill,

    /// Cancel process termination confirmation
    CancelKill,

    /// Toggle the help overlay
    ToggleHelp,

    /// Save current configuration
    SaveConfig,

    /// Terminal resized to columns x rows
    Resize(u16, u16),
}
