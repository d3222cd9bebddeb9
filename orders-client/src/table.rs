//! Orders table view-model
//!
//! Search, pagination and the single-row edit buffer of the admin orders
//! table. Pages are 1-based.

use crate::config::DEFAULT_PAGE_SIZE;
use shared::models::{Order, OrderUpdate};

#[derive(Debug, Clone)]
pub struct OrdersTable {
    orders: Vec<Order>,
    query: String,
    page: usize,
    page_size: usize,
    editing: Option<(String, OrderUpdate)>,
}

impl Default for OrdersTable {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl OrdersTable {
    pub fn new(page_size: usize) -> Self {
        Self {
            orders: Vec::new(),
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
            editing: None,
        }
    }

    /// Replace the rows; returns to the first page
    pub fn set_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
        self.page = 1;
    }

    /// Set the order-number search; returns to the first page
    pub fn set_search(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.page = 1;
    }

    pub fn search(&self) -> &str {
        &self.query
    }

    /// Orders whose number contains the search text
    pub fn filtered(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| self.query.is_empty() || o.order_number.contains(&self.query))
            .collect()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// Jump to `page`; out-of-range pages are ignored
    pub fn set_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.page_count() {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn current_page_rows(&self) -> Vec<&Order> {
        self.filtered()
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Start editing order `id`, seeding the buffer from its fields
    pub fn begin_edit(&mut self, id: &str) -> Option<&mut OrderUpdate> {
        let update = self.orders.iter().find(|o| o.id == id)?.to_update();
        self.editing = Some((id.to_string(), update));
        self.editing.as_mut().map(|(_, u)| u)
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn edit_buffer(&self) -> Option<&OrderUpdate> {
        self.editing.as_ref().map(|(_, u)| u)
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut OrderUpdate> {
        self.editing.as_mut().map(|(_, u)| u)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// End editing and hand out the buffer for saving
    pub fn take_edit(&mut self) -> Option<(String, OrderUpdate)> {
        self.editing.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders(n: usize) -> Vec<Order> {
        (1..=n)
            .map(|i| Order {
                id: format!("id{}", i),
                order_number: (1000 + i).to_string(),
                status: "Pending".into(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_pagination() {
        let mut table = OrdersTable::default();
        table.set_orders(orders(12));
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.current_page_rows().len(), 5);

        assert!(table.set_page(3));
        let last: Vec<&str> = table
            .current_page_rows()
            .iter()
            .map(|o| o.order_number.as_str())
            .collect();
        assert_eq!(last, vec!["1011", "1012"]);

        assert!(!table.set_page(0));
        assert!(!table.set_page(4));
        assert_eq!(table.page(), 3);
    }

    #[test]
    fn test_search_resets_page() {
        let mut table = OrdersTable::new(2);
        table.set_orders(orders(12));
        table.set_page(4);
        table.set_search("  101 ");
        assert_eq!(table.page(), 1);
        assert_eq!(table.search(), "101");
        let numbers: Vec<&str> = table.filtered().iter().map(|o| o.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["1010", "1011", "1012"]);
        assert_eq!(table.page_count(), 2);

        table.set_search("   ");
        assert_eq!(table.filtered().len(), 12);
    }

    #[test]
    fn test_empty_table() {
        let table = OrdersTable::default();
        assert_eq!(table.page_count(), 0);
        assert!(table.current_page_rows().is_empty());
    }

    #[test]
    fn test_edit_buffer() {
        let mut table = OrdersTable::default();
        table.set_orders(orders(2));
        assert!(table.begin_edit("missing").is_none());

        let buffer = table.begin_edit("id2").unwrap();
        assert_eq!(buffer.order_number, "1002");
        buffer.status = "Delivered".into();
        assert_eq!(table.editing_id(), Some("id2"));

        let (id, update) = table.take_edit().unwrap();
        assert_eq!(id, "id2");
        assert_eq!(update.status, "Delivered");
        assert!(table.edit_buffer().is_none());

        table.begin_edit("id1");
        table.cancel_edit();
        assert!(table.editing_id().is_none());
    }
}
