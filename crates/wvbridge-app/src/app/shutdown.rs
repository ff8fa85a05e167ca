use super::core::WvApp;

impl WvApp {
    /// Detach the webview and persist the session it leaves behind.
    pub(super) fn shutdown(&mut self) {
        let Some(bridge) = self.bridge.take() else {
            return;
        };
        // Detaching snapshots the widget history into the view state.
        bridge.detach();

        if let Err(e) = self.persist_session() {
            tracing::warn!("Failed to save session: {e}");
        }
        self.window = None;
    }

    fn persist_session(&self) -> wvbridge_common::Result<()> {
        let (Some(state), Some(store)) = (&self.state, &self.store) else {
            return Ok(());
        };
        store.save(&self.session_id, &state.saved())?;
        Ok(())
    }
}
