//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,

    // 人数设置
    IncreaseCount,
    DecreaseCount,
    ProceedToNaming,

    // 命名
    FocusNext,
    FocusPrev,
    Input(char),
    DeleteChar,
    SubmitName,

    // 计分板
    MoveSelectionUp,
    MoveSelectionDown,
    MoveSelectionLeft,
    MoveSelectionRight,
    IncrementSelected,
    IncrementPlayer(usize), // 数字键直接加分，0 起始下标
    StartDecrement,
    StartResetScores,
    StartNewGame,

    // 确认框
    Confirm, // y / Enter
    Cancel,  // n / Esc
}
