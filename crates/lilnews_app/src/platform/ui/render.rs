use std::collections::HashMap;
use std::ops::Range;

use lilnews_core::{
    AppViewModel, ArticleRowView, FeedView, LoadTicket, PageState, ReaderView, ThumbnailView,
};
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap,
};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::*;
use super::thumbnail::{
    decode_thumbnail, placeholder_span, ThumbnailCells, THUMB_COLS, THUMB_ROWS,
};

/// Terminal-side state the core does not track: selection, scroll offset
/// and decoded thumbnails.
#[derive(Debug, Default)]
pub struct Screen {
    list: ListState,
    thumbnails: HashMap<LoadTicket, Option<ThumbnailCells>>,
    visible: Range<usize>,
    reported: Option<Range<usize>>,
    reader_height: u16,
    reader_limit: Option<u16>,
    reported_limit: Option<u16>,
}

impl Screen {
    pub fn selected(&self) -> Option<usize> {
        self.list.selected()
    }

    pub fn select_offset(&mut self, delta: isize, row_count: usize) {
        if row_count == 0 {
            self.list.select(None);
            return;
        }
        let current = self.list.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(row_count - 1);
        self.list.select(Some(next));
    }

    /// Lines the reader moves per page key.
    pub fn reader_page_lines(&self) -> i32 {
        i32::from(self.reader_height.saturating_sub(1).max(1))
    }

    /// Visible row range after the last draw, if it differs from the last
    /// one handed out.
    pub fn take_visible_change(&mut self) -> Option<Range<usize>> {
        if self.reported.as_ref() == Some(&self.visible) {
            return None;
        }
        self.reported = Some(self.visible.clone());
        Some(self.visible.clone())
    }

    /// Scroll limit of the open page after the last draw, if it differs from
    /// the last one handed out. Closing the reader forgets the old limit.
    pub fn take_reader_limit_change(&mut self) -> Option<u16> {
        match self.reader_limit {
            None => {
                self.reported_limit = None;
                None
            }
            Some(limit) if self.reported_limit == Some(limit) => None,
            Some(limit) => {
                self.reported_limit = Some(limit);
                Some(limit)
            }
        }
    }

    fn sync_rows(&mut self, rows: &[ArticleRowView]) {
        if rows.is_empty() {
            self.list.select(None);
        } else if self.list.selected().is_none_or(|index| index >= rows.len()) {
            self.list.select(Some(0));
        }

        let live: Vec<LoadTicket> = rows
            .iter()
            .filter_map(|row| match &row.thumbnail {
                ThumbnailView::Image { ticket, .. } => Some(*ticket),
                ThumbnailView::Placeholder => None,
            })
            .collect();
        self.thumbnails.retain(|ticket, _| live.contains(ticket));
        for row in rows {
            if let ThumbnailView::Image { ticket, bytes } = &row.thumbnail {
                self.thumbnails
                    .entry(*ticket)
                    .or_insert_with(|| decode_thumbnail(bytes));
            }
        }
    }

    fn cells_for(&self, row: &ArticleRowView) -> Option<&ThumbnailCells> {
        match &row.thumbnail {
            ThumbnailView::Image { ticket, .. } => self.thumbnails.get(ticket)?.as_ref(),
            ThumbnailView::Placeholder => None,
        }
    }
}

pub fn draw(frame: &mut Frame, view: &AppViewModel, screen: &mut Screen) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, view);

    screen.visible = 0..0;
    screen.reader_limit = None;
    if view.loading {
        draw_centered(
            frame,
            body,
            vec![Line::styled(
                format!("{} Loading news", spinner_frame(view.tick)),
                Style::default().fg(COLOR_ACCENT),
            )],
        );
    } else {
        match &view.feed {
            FeedView::Failed(reason) => draw_centered(
                frame,
                body,
                vec![
                    Line::styled(
                        "Could not load news",
                        Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
                    ),
                    Line::styled(reason.clone(), Style::default().fg(COLOR_TEXT_SECONDARY)),
                ],
            ),
            FeedView::Loaded(rows) if rows.is_empty() => draw_centered(
                frame,
                body,
                vec![Line::styled("No articles", Style::default().fg(COLOR_TEXT_SECONDARY))],
            ),
            FeedView::Loaded(rows) => draw_rows(frame, body, rows, screen),
            FeedView::Loading => {}
        }
    }

    if let Some(reader) = &view.reader {
        draw_reader(frame, body, reader, view.tick, screen);
    }

    draw_footer(frame, footer, view);
}

fn draw_header(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let mut spans = vec![Span::styled(
        APP_TITLE,
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
    )];
    if let FeedView::Loaded(rows) = &view.feed {
        spans.push(Span::styled(
            format!("  {} articles", rows.len()),
            Style::default().fg(COLOR_TEXT_SECONDARY),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let text = match (&view.status, &view.reader) {
        (Some(status), _) => status.clone(),
        (None, Some(_)) => "j/k scroll  PgUp/PgDn page  o open in browser  Esc close".to_string(),
        (None, None) => "j/k move  Enter read  q quit".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Line::styled(text, Style::default().fg(COLOR_TEXT_SECONDARY))),
        area,
    );
}

fn draw_centered(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}

fn draw_rows(frame: &mut Frame, area: Rect, rows: &[ArticleRowView], screen: &mut Screen) {
    screen.sync_rows(rows);

    let text_width = usize::from(area.width.saturating_sub(THUMB_COLS + 1)).max(1);
    let texts: Vec<Text<'static>> = rows
        .iter()
        .map(|row| row_text(row, screen.cells_for(row), text_width))
        .collect();
    let heights: Vec<usize> = texts.iter().map(Text::height).collect();
    let list = List::new(texts.into_iter().map(ListItem::new))
        .highlight_style(Style::default().bg(COLOR_SELECTED_BG));
    frame.render_stateful_widget(list, area, &mut screen.list);

    let first = screen.list.offset().min(rows.len());
    screen.visible = first..first + rows_in_view(&heights[first..], usize::from(area.height));
}

/// Number of rows, starting at the top of the view, that are at least
/// partly on screen.
fn rows_in_view(heights: &[usize], available: usize) -> usize {
    let mut used = 0;
    heights
        .iter()
        .take_while(|&&height| {
            let fits = used < available;
            used += height;
            fits
        })
        .count()
}

/// Thumbnail on the left, then the wrapped title and the source on the
/// right, then one blank line.
fn row_text(row: &ArticleRowView, cells: Option<&ThumbnailCells>, width: usize) -> Text<'static> {
    let mut content: Vec<Span<'static>> = wrap_title(&row.title, width)
        .into_iter()
        .map(|line| {
            Span::styled(
                line,
                Style::default()
                    .fg(COLOR_TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    content.push(Span::styled(
        truncate_to_width(&row.source, width),
        Style::default().fg(COLOR_TEXT_SECONDARY),
    ));

    let height = content.len().max(usize::from(THUMB_ROWS));
    let mut lines: Vec<Line<'static>> = (0..height)
        .map(|index| {
            let mut spans = if index >= usize::from(THUMB_ROWS) {
                vec![Span::raw(" ".repeat(usize::from(THUMB_COLS)))]
            } else {
                match cells {
                    Some(cells) => cells.line(index),
                    None => vec![placeholder_span()],
                }
            };
            spans.push(Span::raw(" "));
            if let Some(span) = content.get(index) {
                spans.push(span.clone());
            }
            Line::from(spans)
        })
        .collect();
    lines.push(Line::default());
    Text::from(lines)
}

fn wrap_title(title: &str, width: usize) -> Vec<String> {
    textwrap::wrap(title, width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

fn draw_reader(
    frame: &mut Frame,
    area: Rect,
    reader: &ReaderView,
    tick: u64,
    screen: &mut Screen,
) {
    let area = area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    let title = match &reader.page {
        PageState::Loaded(page) => page.title.clone().unwrap_or_else(|| reader.title.clone()),
        PageState::Loading | PageState::Failed(_) => reader.title.clone(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ACCENT))
        .title(Line::styled(
            format!(
                " {} ",
                truncate_to_width(&title, usize::from(area.width.saturating_sub(4)))
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::styled(
            format!(" {} ", reader.url),
            Style::default().fg(COLOR_TEXT_SECONDARY),
        ))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    screen.reader_height = inner.height;

    let paragraph = match &reader.page {
        PageState::Loading => Paragraph::new(Line::styled(
            format!("{} Loading page", spinner_frame(tick)),
            Style::default().fg(COLOR_ACCENT),
        )),
        PageState::Failed(reason) => Paragraph::new(vec![
            Line::styled(
                "Could not load this page",
                Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
            ),
            Line::styled(reason.clone(), Style::default().fg(COLOR_TEXT_SECONDARY)),
            Line::default(),
            Line::raw("Press o to open it in the system browser."),
        ])
        .wrap(Wrap { trim: true }),
        PageState::Loaded(page) => {
            let body = Paragraph::new(page.text.clone())
                .style(Style::default().fg(COLOR_TEXT_PRIMARY))
                .wrap(Wrap { trim: false });
            // Scroll offsets count wrapped lines, so the limit must too.
            let wrapped = body.line_count(inner.width);
            let limit = wrapped.saturating_sub(usize::from(inner.height));
            screen.reader_limit = Some(u16::try_from(limit).unwrap_or(u16::MAX));
            body.scroll((reader.scroll, 0))
        }
    };

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph.block(block), area);
}
