use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use chordshift::layout::FretLayout;
use chordshift::{ChordCatalog, FretSelector, PitchClass, Point, Rect, VoicingSequence};

const PRE_ROW: u16 = 2;
const POST_ROW: u16 = 4;
const OFFSET_ROW: u16 = 6;
const STRIP_TOP: u16 = 8;
const STRIP_LEFT: u16 = 2;
const ROW_LABEL_WIDTH: u16 = 9;
const KEY_WIDTH: usize = 4;

/// Chord variants offered for one root, in catalog order
struct Picker {
    root: PitchClass,
    names: Vec<String>,
    cursor: usize,
}

/// Everything the live screen shows and reacts to
struct LiveState {
    voicings: VoicingSequence,
    frets: FretSelector,
    strip_cols: u16,
    strip_rows: u16,
    input: String,
    /// Post-transpose entry whose notes are lit on the keyboard
    selected: Option<usize>,
    dragging: bool,
    picker: Option<Picker>,
    pre_buttons: Vec<Rect>,
    post_buttons: Vec<Rect>,
    root_buttons: Vec<Rect>,
    picker_buttons: Vec<Rect>,
}

/// Bounds of `[name]` buttons laid out left to right after the row label
fn button_bounds<S: AsRef<str>>(row: u16, names: &[S]) -> Vec<Rect> {
    let mut col = ROW_LABEL_WIDTH;
    names
        .iter()
        .map(|name| {
            let width = name.as_ref().chars().count() as u16 + 2;
            let bounds = Rect::new(col as f32, row as f32, width as f32, 1.0);
            col += width + 1;
            bounds
        })
        .collect()
}

impl LiveState {
    fn new(layout: &FretLayout) -> Self {
        let right = layout.origin_x + layout.width();
        let bottom = layout.origin_y + layout.height();
        Self {
            voicings: VoicingSequence::new(ChordCatalog::standard()),
            frets: FretSelector::new(layout.zones()),
            strip_cols: right.ceil().max(0.0) as u16,
            strip_rows: bottom.ceil().max(0.0) as u16,
            input: String::new(),
            selected: None,
            dragging: false,
            picker: None,
            pre_buttons: Vec::new(),
            post_buttons: Vec::new(),
            root_buttons: Vec::new(),
            picker_buttons: Vec::new(),
        }
    }

    fn keyboard_row(&self) -> u16 {
        STRIP_TOP + self.strip_rows + 2
    }

    fn root_row(&self) -> u16 {
        self.keyboard_row() + 2
    }

    fn picker_row(&self) -> u16 {
        self.root_row() + 1
    }

    fn input_row(&self) -> u16 {
        self.picker_row() + 2
    }

    /// Recompute where every button sits for the current state
    fn layout_buttons(&mut self) {
        self.pre_buttons = button_bounds(PRE_ROW, &self.voicings.source_view());
        self.post_buttons = button_bounds(POST_ROW, self.voicings.derived_view());
        self.root_buttons = button_bounds(self.root_row(), &PitchClass::ALL.map(|pc| pc.name()));
        self.picker_buttons = match &self.picker {
            Some(picker) => button_bounds(self.picker_row(), &picker.names),
            None => Vec::new(),
        };
    }

    /// Screen cell to fret strip coordinates (cell centre)
    fn strip_point(column: u16, row: u16) -> Point {
        Point::new(
            column as f32 - STRIP_LEFT as f32 + 0.5,
            row as f32 - STRIP_TOP as f32 + 0.5,
        )
    }

    fn open_picker(&mut self, root: PitchClass) {
        let names = self.voicings.catalog().names_with_root(root);
        self.picker = Some(Picker {
            root,
            names,
            cursor: 0,
        });
        self.layout_buttons();
    }

    /// Append the picker's variant at `index` and light up its notes
    fn choose(&mut self, index: usize) {
        let Some(picker) = self.picker.take() else {
            return;
        };
        if let Some(name) = picker.names.get(index) {
            self.voicings.append(name);
            self.selected = Some(self.voicings.len() - 1);
        }
        self.layout_buttons();
    }

    fn remove(&mut self, position: usize) {
        if self.voicings.remove_at(position).is_err() {
            return;
        }
        self.selected = match self.selected {
            Some(i) if i == position => None,
            Some(i) if i > position => Some(i - 1),
            other => other,
        };
        self.layout_buttons();
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let cell = Point::new(mouse.column as f32 + 0.5, mouse.row as f32 + 0.5);
        let hit = |buttons: &[Rect]| buttons.iter().position(|r| r.contains(cell));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(i) = hit(&self.picker_buttons) {
                    self.choose(i);
                } else if let Some(i) = hit(&self.root_buttons) {
                    self.open_picker(PitchClass::ALL[i]);
                } else if let Some(i) = hit(&self.pre_buttons) {
                    self.remove(i);
                } else if let Some(i) = hit(&self.post_buttons) {
                    self.selected = Some(i);
                } else {
                    self.dragging = true;
                    self.frets
                        .pointer_moved(&[Self::strip_point(mouse.column, mouse.row)]);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging => {
                self.frets
                    .pointer_moved(&[Self::strip_point(mouse.column, mouse.row)]);
            }
            MouseEventKind::Up(MouseButton::Left) if self.dragging => {
                self.dragging = false;
                self.frets.pointer_released(&mut self.voicings);
                self.layout_buttons();
            }
            _ => {}
        }
    }

    /// Keys while the picker is open. Returns false if the key should fall
    /// through to the text input.
    fn handle_picker_key(&mut self, code: KeyCode) -> bool {
        let Some(picker) = self.picker.as_mut() else {
            return false;
        };
        let count = picker.names.len().max(1);
        match code {
            KeyCode::Esc => {
                self.picker = None;
                self.layout_buttons();
            }
            KeyCode::Left => picker.cursor = (picker.cursor + count - 1) % count,
            KeyCode::Right => picker.cursor = (picker.cursor + 1) % count,
            KeyCode::Enter => {
                let cursor = picker.cursor;
                self.choose(cursor);
            }
            _ => {
                self.picker = None;
                self.layout_buttons();
                return false;
            }
        }
        true
    }

    /// Returns false when the session should end
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }
        if self.handle_picker_key(key.code) {
            return true;
        }
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Tab => {
                // A bare root opens its picker
                if let Ok(root) = PitchClass::parse(self.input.trim()) {
                    self.input.clear();
                    self.open_picker(root);
                }
            }
            KeyCode::Enter => {
                let name = self.input.trim().to_string();
                if !name.is_empty() {
                    self.voicings.append(&name);
                    self.layout_buttons();
                }
                self.input.clear();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !c.is_control() => self.input.push(c),
            _ => {}
        }
        true
    }
}

/// Run the interactive fretboard mode
pub fn run(layout: FretLayout) -> Result<()> {
    let mut stdout = io::stdout();
    let mut state = LiveState::new(&layout);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)
        .context("alternate screen")?;

    let result = event_loop(&mut state, &mut stdout);

    // Restore terminal
    let _ = execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn event_loop(state: &mut LiveState, stdout: &mut io::Stdout) -> Result<()> {
    state.layout_buttons();
    draw(state, stdout)?;
    loop {
        if !event::poll(Duration::from_millis(50)).context("event poll error")? {
            continue;
        }

        match event::read().context("event read error")? {
            Event::Key(key) => {
                if !state.handle_key(key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => state.handle_mouse(mouse),
            Event::Resize(..) => {}
            _ => continue,
        }
        draw(state, stdout)?;
    }
}

/// Print a row of `[name]` buttons at their laid-out bounds
fn draw_buttons<S: AsRef<str>>(
    stdout: &mut io::Stdout,
    names: &[S],
    bounds: &[Rect],
    marked: Option<usize>,
) -> io::Result<()> {
    for (i, (name, rect)) in names.iter().zip(bounds).enumerate() {
        let text = format!("[{}]", name.as_ref());
        queue!(stdout, MoveTo(rect.left as u16, rect.top as u16))?;
        if marked == Some(i) {
            queue!(
                stdout,
                SetAttribute(Attribute::Reverse),
                Print(&text),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(stdout, Print(&text))?;
        }
    }
    Ok(())
}

fn draw(state: &LiveState, stdout: &mut io::Stdout) -> Result<()> {
    queue!(
        stdout,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print("chordshift live - type a chord + Enter, drag across the frets, Esc quits"),
        MoveTo(0, PRE_ROW),
        Print("Before:"),
        MoveTo(0, POST_ROW),
        Print("After:"),
    )?;

    let source = state.voicings.source_view();
    draw_buttons(stdout, &source, &state.pre_buttons, None)?;
    draw_buttons(
        stdout,
        state.voicings.derived_view(),
        &state.post_buttons,
        state.selected,
    )?;

    let pending = match state.frets.candidate() {
        Some(candidate) if state.dragging => format!(" (release for {})", candidate),
        _ => String::new(),
    };
    queue!(
        stdout,
        MoveTo(0, OFFSET_ROW),
        Print(format!("Transpose: {}{}", state.voicings.offset(), pending)),
    )?;

    draw_strip(state, stdout)?;
    draw_keyboard(state, stdout)?;

    queue!(stdout, MoveTo(0, state.root_row()), Print("Roots:"))?;
    let roots = PitchClass::ALL.map(|pc| pc.name());
    let open_root = state
        .picker
        .as_ref()
        .map(|p| p.root.semitone() as usize);
    draw_buttons(stdout, &roots, &state.root_buttons, open_root)?;
    if let Some(picker) = &state.picker {
        queue!(
            stdout,
            MoveTo(0, state.picker_row()),
            Print(format!("Pick {}:", picker.root)),
        )?;
        draw_buttons(
            stdout,
            &picker.names,
            &state.picker_buttons,
            Some(picker.cursor),
        )?;
    }

    let input_row = state.input_row();
    queue!(
        stdout,
        MoveTo(0, input_row),
        Print(format!("> {}", state.input)),
        MoveTo(0, input_row + 1),
        Print("click a root (or type it + Tab) to pick a chord; Before removes, After shows notes"),
    )?;
    stdout.flush()?;
    Ok(())
}

fn draw_strip(state: &LiveState, stdout: &mut io::Stdout) -> io::Result<()> {
    for row in 0..state.strip_rows {
        let line: String = (0..state.strip_cols)
            .map(|col| {
                let p = Point::new(col as f32 + 0.5, row as f32 + 0.5);
                match state.frets.zone_at(p) {
                    Some(i) if state.frets.is_hovered(i) => '█',
                    Some(i) if i % 2 == 0 => '░',
                    Some(_) => '▒',
                    None => ' ',
                }
            })
            .collect();
        queue!(stdout, MoveTo(STRIP_LEFT, STRIP_TOP + row), Print(line))?;
    }

    // Fret numbers under each zone
    for zone in state.frets.zones() {
        let col = zone.bounds.left.max(0.0) as u16;
        queue!(
            stdout,
            MoveTo(STRIP_LEFT + col, STRIP_TOP + state.strip_rows),
            Print(zone.label),
        )?;
    }
    Ok(())
}

fn draw_keyboard(state: &LiveState, stdout: &mut io::Stdout) -> io::Result<()> {
    let notes = state
        .selected
        .and_then(|i| state.voicings.highlight(i))
        .unwrap_or(&[]);
    queue!(stdout, MoveTo(STRIP_LEFT, state.keyboard_row()))?;
    for pc in PitchClass::ALL {
        let key = format!("{:^width$}", pc.name(), width = KEY_WIDTH);
        if notes.contains(&pc) {
            queue!(
                stdout,
                SetAttribute(Attribute::Reverse),
                Print(key),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(stdout, Print(key))?;
        }
    }
    Ok(())
}
