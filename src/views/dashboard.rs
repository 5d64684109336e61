//! Dashboard shell: tab selection between the orders and menu views

use super::{MenuView, OrdersView};
use crate::config::TavolaConfig;
use crate::core::DashboardApi;
use std::sync::Arc;

/// Top-level tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Orders,
    Menu,
}

/// Owns both views and the active tab
///
/// Only the visible view is active: leaving the orders tab stops its
/// background refresh.
pub struct Dashboard {
    orders: OrdersView,
    menu: MenuView,
    active: Tab,
    started: bool,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>, config: &TavolaConfig) -> Self {
        Self {
            orders: OrdersView::new(Arc::clone(&api), config.orders.refresh_interval()),
            menu: MenuView::new(api),
            active: Tab::default(),
            started: false,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    pub fn orders(&self) -> &OrdersView {
        &self.orders
    }

    pub fn menu(&self) -> &MenuView {
        &self.menu
    }

    /// Activate the view of the current tab
    pub async fn start(&mut self) {
        self.started = true;
        self.activate(self.active).await;
    }

    pub async fn switch_tab(&mut self, tab: Tab) {
        if tab == self.active && self.started {
            return;
        }
        if self.active == Tab::Orders {
            self.orders.deactivate().await;
        }
        self.active = tab;
        self.started = true;
        self.activate(tab).await;
        tracing::debug!(?tab, "switched tab");
    }

    /// Deactivate everything
    pub async fn shutdown(&mut self) {
        self.orders.deactivate().await;
        self.started = false;
    }

    async fn activate(&self, tab: Tab) {
        match tab {
            Tab::Orders => self.orders.activate().await,
            Tab::Menu => self.menu.activate().await,
        }
    }
}
