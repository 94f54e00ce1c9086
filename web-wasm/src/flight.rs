//! 進行中リクエストの単一スロット
//!
//! メインのラダー走査は同時に1本だけネットワーク呼び出しを持つ。
//! 新しい走査の開始は前のAbortControllerを中断してから差し替える

use std::cell::RefCell;
use std::rc::Rc;
use web_sys::AbortController;

#[derive(Clone, Default)]
pub struct FlightSlot {
    current: Rc<RefCell<Option<AbortController>>>,
}

impl FlightSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 前の要求を中断し、新しいコントローラを据えて返す
    pub fn begin(&self) -> AbortController {
        let controller = AbortController::new().expect("AbortControllerが生成できません");
        if let Some(prev) = self.current.borrow_mut().replace(controller.clone()) {
            prev.abort();
        }
        controller
    }
}
