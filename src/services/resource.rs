//! A remotely loaded value and its lifecycle, shared by every consumer
//! that fetches data and needs to render loading and failure states.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// A value fetched from elsewhere plus its load state. A failed load keeps
/// the previous data, so callers can keep showing the last good snapshot
/// next to the error.
#[derive(Clone, Debug)]
pub struct Resource<T> {
    status: ResourceStatus,
    data: Option<T>,
    error: Option<String>,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            status: ResourceStatus::Idle,
            data: None,
            error: None,
        }
    }
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ResourceStatus {
        self.status
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == ResourceStatus::Loading
    }

    /// A new attempt starts: previous data stays visible, previous error
    /// is dismissed.
    pub fn start_loading(&mut self) {
        self.status = ResourceStatus::Loading;
        self.error = None;
    }

    pub fn resolve(&mut self, data: T) {
        self.status = ResourceStatus::Success;
        self.data = Some(data);
        self.error = None;
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = ResourceStatus::Error;
        self.error = Some(error.into());
    }

    /// Replace the data without touching status or error. Used for local
    /// edits that are not themselves a load.
    pub fn set_data(&mut self, data: T) {
        self.data = Some(data);
    }

    pub fn data_or_default(&mut self) -> &mut T
    where
        T: Default,
    {
        self.data.get_or_insert_with(T::default)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_resource_is_idle_and_empty() {
        let resource: Resource<Vec<i32>> = Resource::new();
        assert_eq!(resource.status(), ResourceStatus::Idle);
        assert!(resource.data().is_none());
        assert!(resource.error().is_none());
    }

    #[test]
    fn resolve_sets_data_and_clears_error() {
        let mut resource = Resource::new();
        resource.fail("boom");
        resource.start_loading();
        resource.resolve(vec![1, 2, 3]);

        assert_eq!(resource.status(), ResourceStatus::Success);
        assert_eq!(resource.data().unwrap(), &vec![1, 2, 3]);
        assert!(resource.error().is_none());
    }

    #[test]
    fn fail_keeps_previous_data() {
        let mut resource = Resource::new();
        resource.resolve(vec![1]);
        resource.start_loading();
        resource.fail("server unreachable");

        assert_eq!(resource.status(), ResourceStatus::Error);
        assert_eq!(resource.data().unwrap(), &vec![1]);
        assert_eq!(resource.error(), Some("server unreachable"));
    }

    #[test]
    fn start_loading_dismisses_error() {
        let mut resource: Resource<i32> = Resource::new();
        resource.fail("boom");
        resource.start_loading();

        assert!(resource.is_loading());
        assert!(resource.error().is_none());
    }

    #[test]
    fn set_data_does_not_change_status() {
        let mut resource = Resource::new();
        resource.set_data(vec![7]);

        assert_eq!(resource.status(), ResourceStatus::Idle);
        assert_eq!(resource.data().unwrap(), &vec![7]);
    }
}
