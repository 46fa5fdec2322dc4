//! Interactive terminal demo: a toggle and a select bound to form fields.
//!
//! Tab moves focus, Enter/Space activate, arrows navigate the open list,
//! the mouse clicks and hovers. `q` quits.

use std::fs::File;
use std::io::{self, Write};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyEventKind,
    MouseEvent, MouseEventKind,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use simplelog::{Config, LevelFilter, WriteLogger};

use formkit::layout::hit_any;
use formkit::prelude::*;
use formkit::WidgetId;

/// Rows of the option list visible at once.
const VISIBLE_ROWS: u16 = 4;

struct App {
    notifications: ToggleControl,
    region: SelectControl<&'static str>,
    notify_field: FormField<bool>,
    region_field: FormField<&'static str>,
    frames: FrameQueue,
    /// 0 = toggle, 1 = select
    focus: usize,
}

impl App {
    fn new() -> Self {
        let frames = FrameQueue::new();

        let notifications = ToggleControl::new().with_label("Email notifications");
        let region = SelectControl::new(vec![
            SelectOption::new("us-east", "US East"),
            SelectOption::new("us-west", "US West"),
            SelectOption::new("eu-central", "EU Central"),
            SelectOption::new("eu-north", "EU North").disabled(),
            SelectOption::new("ap-south", "Asia Pacific (South)"),
            SelectOption::new("ap-east", "Asia Pacific (East)"),
            SelectOption::new("sa-east", "South America"),
        ])
        .with_label("Region")
        .with_placeholder("Choose a region")
        .with_scheduler(frames.clone());

        let notify_field = FormField::new(Some(true));
        notify_field.bind(&notifications);
        let region_field = FormField::new(None);
        region_field.bind(&region);

        Self {
            notifications,
            region,
            notify_field,
            region_field,
            frames,
            focus: 0,
        }
    }

    fn focused(&self) -> &dyn Widget {
        if self.focus == 0 {
            &self.notifications
        } else {
            &self.region
        }
    }

    fn set_focus(&mut self, focus: usize) {
        if self.focus == focus {
            return;
        }
        self.focused().on_blur();
        self.focus = focus;
        self.focused().on_focus();
        log::debug!("App::set_focus focus={}", focus);
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, combo: KeyCombo) -> bool {
        if self.focused().on_key(&combo).prevents_default() {
            return true;
        }
        match combo.key {
            Key::Tab | Key::BackTab => self.set_focus((self.focus + 1) % 2),
            Key::Char('q') | Key::Escape => return false,
            Key::Char('c') if combo.modifiers.ctrl => return false,
            _ => {}
        }
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, layout: &LayoutResult) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => {
                let pointer = Event::PointerDown {
                    x,
                    y,
                    button: button.into(),
                };
                self.region.handle_event(&pointer, layout);
                if button != event::MouseButton::Left {
                    return;
                }

                if let Some(index) = self.option_at(x, y, layout) {
                    self.region.handle_event(&Event::OptionClick(index), layout);
                } else if hit(layout, self.notifications.id(), x, y) {
                    self.set_focus(0);
                    self.notifications.handle_event(&Event::Click, layout);
                } else if hit(layout, self.region.id(), x, y) {
                    self.set_focus(1);
                    self.region.handle_event(&Event::Click, layout);
                }
            }
            MouseEventKind::Moved => {
                if let Some(index) = self.option_at(x, y, layout) {
                    self.region.handle_event(&Event::OptionHover(index), layout);
                }
            }
            _ => {}
        }
    }

    fn option_at(&self, x: u16, y: u16, layout: &LayoutResult) -> Option<usize> {
        let id = self.region.id();
        (0..self.region.option_count()).find(|i| {
            layout
                .get(&id.option_id(*i))
                .is_some_and(|rect| rect.contains(x, y))
        })
    }
}

fn hit(layout: &LayoutResult, id: &WidgetId, x: u16, y: u16) -> bool {
    hit_any(layout, [id.as_str()], x, y)
}

fn draw(out: &mut impl Write, rect: Rect, text: &str, highlight: bool) -> io::Result<()> {
    queue!(out, cursor::MoveTo(rect.x, rect.y))?;
    if highlight {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    queue!(out, Print(text), SetAttribute(Attribute::Reset))
}

/// Draw the app and return the layout the next events are hit-tested against.
fn render(out: &mut impl Write, app: &App) -> io::Result<LayoutResult> {
    let mut layout = LayoutResult::new();
    queue!(
        out,
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        Print("formkit playground (Tab: focus, q: quit)")
    )?;

    // Toggle
    let toggle = app.notifications.view();
    let rect = Rect::new(2, 2, app.notifications.intrinsic_width(), 1);
    layout.insert(toggle.id.clone(), rect);
    let text = format!("{} {}", toggle.indicator, toggle.label);
    draw(out, rect, &text, app.focus == 0)?;

    // Select
    let select = app.region.view();
    queue!(out, cursor::MoveTo(2, 4), Print(&select.label))?;
    let width = app.region.intrinsic_width();
    let rect = Rect::new(2, 5, width, 1);
    layout.insert(select.id.clone(), rect);
    let text = format!(
        "{:<pad$} {}",
        select.display_text,
        select.indicator,
        pad = width.saturating_sub(2) as usize
    );
    draw(out, rect, &text, app.focus == 1)?;

    if select.open {
        let rows = (select.options.len() as u16).min(VISIBLE_ROWS);
        layout.insert(select.listbox_id.clone(), Rect::new(2, 6, width, rows));

        let offset = select.scroll_offset as usize;
        for (i, row) in select
            .options
            .iter()
            .enumerate()
            .skip(offset)
            .take(rows as usize)
        {
            let rect = Rect::new(2, 6 + (i - offset) as u16, width, 1);
            layout.insert(row.id.clone(), rect);
            let marker = if row.selected { "*" } else { " " };
            let label = if row.disabled {
                format!("{} (unavailable)", row.label)
            } else {
                row.label.clone()
            };
            draw(out, rect, &format!("{}{}", marker, label), row.focused)?;
        }
    }

    // Form state
    let status = format!(
        "notifications={:?} (dirty={}, touched={})  region={:?} (dirty={}, touched={})",
        app.notify_field.value(),
        app.notify_field.is_dirty(),
        app.notify_field.is_touched(),
        app.region_field.value(),
        app.region_field.is_dirty(),
        app.region_field.is_touched(),
    );
    queue!(out, cursor::MoveTo(0, 12), Print(status))?;

    Ok(layout)
}

fn run(out: &mut impl Write, app: &mut App) -> io::Result<()> {
    loop {
        let mut layout = render(out, app)?;
        // Deferred scrolls need the layout that was just drawn
        if app.frames.flush(&layout) > 0 && app.region.is_dirty() {
            layout = render(out, app)?;
        }
        app.notifications.clear_dirty();
        app.region.clear_dirty();
        out.flush()?;

        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if !app.handle_key(key.into()) {
                    log::info!("playground: quit");
                    return Ok(());
                }
            }
            CrosstermEvent::Mouse(mouse) => app.handle_mouse(mouse, &layout),
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("playground.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut app = App::new();
    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

    let result = run(&mut stdout, &mut app);

    execute!(stdout, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}
