/// Control directive returned by `Presenter::advance`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

impl AppControl {
    #[inline]
    pub fn is_continue(self) -> bool {
        self == AppControl::Continue
    }
}
