use ratatui::layout::{Rect, Layout as RatLayout, Direction, Constraint};

pub struct Layout {
    pub header_area: Rect,
    /// Everything between the header and the status bar
    pub page_area: Rect,
    pub title_area: Rect,
    pub filters_area: Rect,
    pub main_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Height: header (1) + title (1) + filters (3) + at least one row card (4) + status (1)
    pub const MIN_WIDTH: u16 = 40;
    pub const MIN_HEIGHT: u16 = 10;

    pub fn calculate(size: Rect) -> Self {
        let width = size.width.max(Self::MIN_WIDTH);
        let height = size.height.max(Self::MIN_HEIGHT);
        let size = Rect::new(size.x, size.y, width, height);

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(1),    // Page
                Constraint::Length(1), // Status
            ])
            .split(size);

        let page = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title + "Add Task"
                Constraint::Length(3), // Filters (borders + content)
                Constraint::Min(1),    // Task list
            ])
            .split(vertical[1]);

        Self {
            header_area: vertical[0],
            page_area: vertical[1],
            title_area: page[0],
            filters_area: page[1],
            main_area: page[2],
            status_area: vertical[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn areas_stack_without_gaps() {
        let layout = Layout::calculate(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.title_area.y, 1);
        assert_eq!(layout.filters_area.y, 2);
        assert_eq!(layout.main_area.y, 5);
        assert_eq!(layout.main_area.height, 34);
        assert_eq!(layout.status_area.y, 39);
    }

    #[test]
    fn small_terminals_are_clamped() {
        let layout = Layout::calculate(Rect::new(0, 0, 10, 5));
        assert_eq!(layout.status_area.width, Layout::MIN_WIDTH);
        assert_eq!(layout.status_area.y, Layout::MIN_HEIGHT - 1);
    }
}
