//! Grid rendering.
//!
//! Precedence: error panel, then loading, then empty state, then the
//! populated grid. Only the populated grid evaluates rows.

use crate::accessor::Record;
use crate::cell::CellRenderer;
use crate::column::{Column, ColumnType, ColumnWidth};
use crate::identity::RowId;
use crate::node::{Border, CheckState, Layout, Node, Size, Style, Tone};
use crate::pagination::PageInfo;

use super::{Grid, GridMode};

const EXPAND_COLUMN: &str = "__expand";
const ACTIONS_COLUMN: &str = "__actions";
const ACTION_TRIGGER: &str = "⋯";

impl<T: Record> Grid<T> {
    /// Build the display tree for the current state.
    pub fn render(&self) -> Node {
        log::trace!(
            "Rendering {} ({:?}): {} rows, loading={}, error={}",
            self.id,
            self.mode,
            self.data.len(),
            self.loading,
            self.error.is_some()
        );

        if let Some(message) = &self.error {
            return self.render_error(message);
        }
        if self.loading {
            return Node::column_styled(
                self.element_id("loading"),
                vec![Node::Spinner {
                    label: self.config.loading_label.clone(),
                }],
                Style::new(),
                Layout::new(),
            );
        }

        let mut children = Vec::new();
        if let Some(toolbar) = self.render_toolbar() {
            children.push(toolbar);
        }

        if self.data.is_empty() {
            children.push(self.render_empty());
        } else {
            let columns: Vec<&Column<T>> = self.visible_columns().collect();
            children.push(self.render_header(&columns));
            let body = Node::column_styled(
                self.element_id("body"),
                self.render_body(&columns),
                Style::new(),
                Layout::new(),
            );
            children.push(match self.mode {
                GridMode::Root => Node::Scroll {
                    id: self.element_id("scroll"),
                    child: Box::new(body),
                },
                GridMode::Child => body,
            });
            if let Some(footer) = self.render_footer() {
                children.push(footer);
            }
        }

        Node::column_styled(self.id.to_string(), children, Style::new(), Layout::new())
    }

    fn render_error(&self, message: &str) -> Node {
        let mut children = vec![
            Node::text_styled("Something went wrong", Style::new().fg(Tone::Danger).bold()),
            Node::text(message),
        ];
        if self.on_refresh.is_some() {
            children.push(Node::button(self.element_id("retry"), "Retry"));
        }
        Node::column_styled(self.element_id("error"), children, Style::new(), Layout::new())
    }

    fn render_empty(&self) -> Node {
        let mut children = Vec::new();
        if let Some(icon) = &self.config.empty_icon {
            children.push(Node::text_styled(icon, Style::new().fg(Tone::Muted)));
        }
        children.push(Node::text_styled(
            &self.config.empty_message,
            Style::new().fg(Tone::Muted),
        ));
        Node::column_styled(self.element_id("empty"), children, Style::new(), Layout::new())
    }

    fn render_toolbar(&self) -> Option<Node> {
        let mut children = Vec::new();
        if self.searchable {
            children.push(Node::Input {
                id: self.element_id("search"),
                value: self.search_value.clone(),
                placeholder: "Search".to_string(),
            });
        }
        if self.on_refresh.is_some() {
            children.push(Node::button(self.element_id("refresh"), "Refresh"));
        }
        if children.is_empty() {
            return None;
        }
        Some(Node::row_styled(
            self.element_id("toolbar"),
            children,
            Style::new(),
            Layout::new().gap(2),
        ))
    }

    fn render_header(&self, columns: &[&Column<T>]) -> Node {
        let mut children = Vec::new();

        if self.selectable {
            let range = self.visible_range();
            let start = range.start;
            let rows = self.data[range.clone()]
                .iter()
                .enumerate()
                .map(|(offset, row)| (start + offset, row));
            let any_selectable = self.data[range]
                .iter()
                .enumerate()
                .any(|(offset, row)| self.selection.is_selectable(row, start + offset));
            children.push(Node::Checkbox {
                id: self.element_id("select-all"),
                state: self.selection.header_state(rows, &self.identity),
                disabled: !any_selectable,
                hint: None,
            });
        }

        if self.expandable.is_some() {
            children.push(Node::Cell {
                column_id: EXPAND_COLUMN.to_string(),
                child: Box::new(Node::Empty),
                layout: Layout::new().width(Size::Fixed(1)),
            });
        }

        for column in columns {
            let label = match &self.sort {
                Some(sort) if sort.column_id == column.id => {
                    format!("{} {}", column.label, sort.direction.indicator())
                }
                _ => column.label.clone(),
            };
            let content = if column.sortable {
                Node::Button {
                    id: self.element_id(&format!("header-{}", column.id)),
                    label,
                    disabled: false,
                    style: Style::new().bold(),
                }
            } else {
                Node::text_styled(label, Style::new().bold())
            };
            children.push(self.cell(column, content));
        }

        if self.needs_trailing_actions() {
            children.push(Node::Cell {
                column_id: ACTIONS_COLUMN.to_string(),
                child: Box::new(Node::Empty),
                layout: Layout::new().width(Size::Fixed(1)),
            });
        }

        Node::row_styled(
            self.element_id("header"),
            children,
            Style::new().fg(Tone::Muted),
            Layout::new(),
        )
    }

    fn render_body(&self, columns: &[&Column<T>]) -> Vec<Node> {
        let renderer = CellRenderer::new(&self.config);
        let mut nodes = Vec::new();
        for index in self.visible_range() {
            let row = &self.data[index];
            let id = self.identity.id(row, index);
            nodes.push(self.render_row(&renderer, columns, row, index, &id));

            if self.menu.target_index() == Some(index) {
                nodes.push(self.render_menu(row, &id));
            }

            let Some(expandable) = &self.expandable else {
                continue;
            };
            if self.expansion.is_expanded(&id) && self.expansion.is_expandable(row, index) {
                nodes.push(Node::column_styled(
                    self.element_id(&format!("expanded-{id}")),
                    vec![(expandable.render_content)(row, index)],
                    Style::new(),
                    Layout::new()
                        .indent(self.config.expanded_indent)
                        .border(Border::Leading),
                ));
            }
        }
        nodes
    }

    fn render_row(
        &self,
        renderer: &CellRenderer<'_>,
        columns: &[&Column<T>],
        row: &T,
        index: usize,
        id: &RowId,
    ) -> Node {
        let mut children = Vec::new();
        let selected = self.selectable && self.selection.is_selected(id);

        if self.selectable {
            let selectability = self.selection.selectability(row, index);
            children.push(Node::Checkbox {
                id: self.element_id(&format!("select-{id}")),
                state: if selected {
                    CheckState::Checked
                } else {
                    CheckState::Unchecked
                },
                disabled: !selectability.condition,
                hint: selectability.reason,
            });
        }

        if self.expandable.is_some() {
            let child = if self.expansion.is_expandable(row, index) {
                let expanded = self.expansion.is_expanded(id);
                Node::Disclosure {
                    id: self.element_id(&format!("expand-{id}")),
                    expanded,
                    indicator: if expanded {
                        self.config.expanded_indicator
                    } else {
                        self.config.collapsed_indicator
                    },
                }
            } else {
                Node::Empty
            };
            children.push(Node::Cell {
                column_id: EXPAND_COLUMN.to_string(),
                child: Box::new(child),
                layout: Layout::new().width(Size::Fixed(1)),
            });
        }

        for column in columns {
            let content = if column.column_type() == Some(ColumnType::Actions) {
                self.action_trigger(id)
            } else {
                let value = row.resolve(column.path());
                renderer.render(column, value.as_ref(), row, index)
            };
            children.push(self.cell(column, content));
        }

        if self.needs_trailing_actions() {
            children.push(Node::Cell {
                column_id: ACTIONS_COLUMN.to_string(),
                child: Box::new(self.action_trigger(id)),
                layout: Layout::new().width(Size::Fixed(1)),
            });
        }

        let style = if selected {
            Style::new().fg(Tone::Primary)
        } else {
            Style::new()
        };
        Node::row_styled(self.element_id(&format!("row-{id}")), children, style, Layout::new())
    }

    fn render_menu(&self, row: &T, id: &RowId) -> Node {
        let children = self
            .row_actions
            .iter()
            .enumerate()
            .map(|(position, action)| {
                let disabled = action.is_disabled(row);
                let mut style = match action.tone {
                    Some(tone) => Style::new().fg(tone),
                    None => Style::new(),
                };
                if disabled {
                    style = style.dim();
                }
                let label = match &action.icon {
                    Some(icon) => format!("{icon} {}", action.label),
                    None => action.label.clone(),
                };
                Node::Button {
                    id: self.element_id(&format!("action-{position}")),
                    label,
                    disabled,
                    style,
                }
            })
            .collect();
        Node::Overlay {
            id: self.element_id("menu"),
            anchor: self.element_id(&format!("row-{id}")),
            children,
        }
    }

    fn render_footer(&self) -> Option<Node> {
        if self.mode.is_child() {
            return None;
        }
        let pagination = self.pagination?;
        let info = PageInfo::derive(&pagination);
        let nav = |part: &str, label: &str, enabled: bool| Node::Button {
            id: self.element_id(part),
            label: label.to_string(),
            disabled: !enabled,
            style: Style::new(),
        };
        Some(Node::row_styled(
            self.element_id("footer"),
            vec![
                Node::text_styled(info.summary(pagination.total), Style::new().fg(Tone::Muted)),
                Node::text(format!(
                    "Page {} of {}",
                    pagination.page,
                    info.total_pages.max(1)
                )),
                nav("page-first", "«", info.can_go_prev),
                nav("page-prev", "‹", info.can_go_prev),
                nav("page-next", "›", info.can_go_next),
                nav("page-last", "»", info.can_go_next),
            ],
            Style::new(),
            Layout::new().gap(2),
        ))
    }

    fn action_trigger(&self, id: &RowId) -> Node {
        if self.row_actions.is_empty() {
            return Node::Empty;
        }
        Node::button(self.element_id(&format!("actions-{id}")), ACTION_TRIGGER)
    }

    fn needs_trailing_actions(&self) -> bool {
        !self.row_actions.is_empty() && !self.has_action_column()
    }

    fn cell(&self, column: &Column<T>, content: Node) -> Node {
        let width = match column.width.unwrap_or(self.config.default_column_width) {
            ColumnWidth::Fixed(width) => Size::Fixed(width),
            ColumnWidth::Percent(percent) => Size::Percent(percent),
            ColumnWidth::Flex(weight) => Size::Flex(weight),
        };
        Node::Cell {
            column_id: column.id.clone(),
            child: Box::new(content),
            layout: Layout::new().width(width).align(column.align),
        }
    }
}
