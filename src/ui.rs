use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ramp_allocation::{
    AllocationEngine, AllocationError, Availability, DurationUnit, Languages, ProgressBand,
    RampForm, StatusStyle, ViewModel,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    RampDetails,
    Allocation,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::RampDetails => Page::Allocation,
            Page::Allocation => Page::RampDetails,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::RampDetails => "Ramp Details",
            Page::Allocation => "Location Allocation",
        }
    }
}

/// Rows of the ramp details page. Which ones show depends on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailRow {
    StartAvailability,
    StartDate,
    EndAvailability,
    EndDate,
    ClientTrainer,
    InternalTrainer,
    TotalTrainers,
    TrainingDuration,
    TrainingDurationNumber,
    NestingDuration,
    NestingDurationNumber,
    BatchSize,
    SupervisorRatio,
    QaRatio,
    TrainerRatio,
    Languages,
    VoiceInbound,
    VoiceOutbound,
    Chat,
    Email,
    SocialSms,
    BackOffice,
    Others,
}

impl DetailRow {
    pub fn label(&self) -> &'static str {
        match self {
            DetailRow::StartAvailability => "Ramp Start Availability",
            DetailRow::StartDate => "Ramp Start Date",
            DetailRow::EndAvailability => "Ramp End Availability",
            DetailRow::EndDate => "Ramp End Date",
            DetailRow::ClientTrainer => "Client Trainer",
            DetailRow::InternalTrainer => "Internal Trainer",
            DetailRow::TotalTrainers => "Total Trainers",
            DetailRow::TrainingDuration => "Training Duration",
            DetailRow::TrainingDurationNumber => "  Number",
            DetailRow::NestingDuration => "Nesting Duration",
            DetailRow::NestingDurationNumber => "  Number",
            DetailRow::BatchSize => "Batch Size",
            DetailRow::SupervisorRatio => "Supervisor Ratio",
            DetailRow::QaRatio => "QA Ratio",
            DetailRow::TrainerRatio => "Trainer Ratio",
            DetailRow::Languages => "Languages Supported",
            DetailRow::VoiceInbound => "Voice - Inbound",
            DetailRow::VoiceOutbound => "Voice - Outbound",
            DetailRow::Chat => "Chat",
            DetailRow::Email => "Email",
            DetailRow::SocialSms => "Social Media/SMS",
            DetailRow::BackOffice => "Back Office",
            DetailRow::Others => "Others",
        }
    }
}

/// Rows currently on screen, in form order.
pub fn visible_rows(form: &RampForm) -> Vec<DetailRow> {
    let visibility = form.visibility();
    let mut rows = vec![DetailRow::StartAvailability];

    if visibility.start_date {
        rows.push(DetailRow::StartDate);
    }
    rows.push(DetailRow::EndAvailability);
    if visibility.end_date {
        rows.push(DetailRow::EndDate);
    }
    rows.extend([
        DetailRow::ClientTrainer,
        DetailRow::InternalTrainer,
        DetailRow::TotalTrainers,
    ]);
    if visibility.additional_fields {
        rows.push(DetailRow::TrainingDuration);
        if visibility.training_duration_number {
            rows.push(DetailRow::TrainingDurationNumber);
        }
        rows.push(DetailRow::NestingDuration);
        if visibility.nesting_duration_number {
            rows.push(DetailRow::NestingDurationNumber);
        }
        rows.push(DetailRow::BatchSize);
    }
    rows.extend([
        DetailRow::SupervisorRatio,
        DetailRow::QaRatio,
        DetailRow::TrainerRatio,
        DetailRow::Languages,
        DetailRow::VoiceInbound,
        DetailRow::VoiceOutbound,
        DetailRow::Chat,
        DetailRow::Email,
        DetailRow::SocialSms,
        DetailRow::BackOffice,
        DetailRow::Others,
    ]);
    rows
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, delta: i32) -> T {
    let len = options.len() as i32;
    let idx = options.iter().position(|o| *o == current).unwrap_or(0) as i32;
    options[(idx + delta).rem_euclid(len) as usize]
}

/// None, 1..=10 - the trainer / duration selects.
fn cycle_small(current: Option<u8>, delta: i32) -> Option<u8> {
    let options: Vec<Option<u8>> = std::iter::once(None).chain((1..=10).map(Some)).collect();
    cycle(&options, current, delta)
}

/// None, 5, 10, ... 50 - the batch size select.
fn cycle_batch(current: Option<u8>, delta: i32) -> Option<u8> {
    let options: Vec<Option<u8>> = std::iter::once(None)
        .chain((5..55).step_by(5).map(Some))
        .collect();
    cycle(&options, current, delta)
}

fn shift_date(current: Option<NaiveDate>, delta: i32) -> Option<NaiveDate> {
    match current {
        None => Some(Local::now().date_naive()),
        Some(date) => Some(date + Duration::days(delta as i64)),
    }
}

const AVAILABILITY: [Availability; 3] = [
    Availability::Unset,
    Availability::Available,
    Availability::NotAvailable,
];

const DURATION: [DurationUnit; 3] = [DurationUnit::Unset, DurationUnit::Days, DurationUnit::Weeks];

const LANGUAGES: [Languages; 3] = [Languages::Unset, Languages::Single, Languages::Bilingual];

/// u32::MAX has ten digits.
const MAX_FIELD_DIGITS: usize = 10;

/// Status-line message and the color it shows in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub style: StatusStyle,
}

impl Notice {
    pub fn new(text: impl Into<String>, style: StatusStyle) -> Self {
        Notice {
            text: text.into(),
            style,
        }
    }

    /// Unknown codes are configuration mistakes; inactive regions are just user order.
    pub fn from_error(err: &AllocationError) -> Self {
        let style = if err.is_unknown_region() {
            StatusStyle::Danger
        } else {
            StatusStyle::Warning
        };
        Notice::new(err.to_string(), style)
    }
}

pub struct App {
    pub engine: AllocationEngine,
    pub view: ViewModel,
    pub form: RampForm,
    pub current_page: Page,

    /// Row 0 is the required total, rows 1.. are regions in catalog order
    pub allocation_state: TableState,
    pub details_state: TableState,

    /// Text of each allocation row's input, same indexing as allocation_state
    pub fields: Vec<String>,

    /// Use the strict engine operations and surface their errors
    pub strict: bool,
    pub notice: Option<Notice>,
}

impl App {
    pub fn new(engine: AllocationEngine, strict: bool) -> Self {
        let view = engine.recompute();

        let mut allocation_state = TableState::default();
        allocation_state.select(Some(0));
        let mut details_state = TableState::default();
        details_state.select(Some(0));

        let mut app = Self {
            engine,
            view,
            form: RampForm::new(),
            current_page: Page::Allocation,
            allocation_state,
            details_state,
            fields: Vec::new(),
            strict,
            notice: None,
        };
        app.sync_fields();
        app
    }

    /// Rebuild every input's text from engine state.
    fn sync_fields(&mut self) {
        let state = self.engine.state();
        self.fields = std::iter::once(state.required.to_string())
            .chain(state.regions.iter().map(|r| r.allocated.to_string()))
            .collect();
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    fn row_count(&self) -> usize {
        match self.current_page {
            Page::Allocation => self.fields.len(),
            Page::RampDetails => visible_rows(&self.form).len(),
        }
    }

    fn table_state(&mut self) -> &mut TableState {
        match self.current_page {
            Page::Allocation => &mut self.allocation_state,
            Page::RampDetails => &mut self.details_state,
        }
    }

    pub fn next(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let state = self.table_state();
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let state = self.table_state();
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => (i - 1).min(len - 1),
        };
        state.select(Some(i));
    }

    fn selected_region_code(&self) -> Option<String> {
        let idx = self.allocation_state.selected()?;
        if idx == 0 {
            return None;
        }
        self.engine
            .state()
            .regions
            .get(idx - 1)
            .map(|r| r.code.to_string())
    }

    // ------------------------------------------------------------------------
    // Allocation page events
    // ------------------------------------------------------------------------

    /// Checkbox toggle on the selected region.
    pub fn toggle_selected(&mut self) {
        let Some(code) = self.selected_region_code() else {
            return;
        };
        let active = self
            .engine
            .region(&code)
            .map(|r| r.active)
            .unwrap_or(false);

        self.notice = None;
        if self.strict {
            match self.engine.try_set_region_active(&code, !active) {
                Ok(view) => self.view = view,
                Err(err) => self.notice = Some(Notice::from_error(&err)),
            }
        } else {
            self.view = self.engine.set_region_active(&code, !active);
        }
        self.sync_fields();
    }

    /// Field edited: feed the whole text back to the engine.
    fn apply_field(&mut self, idx: usize) {
        self.notice = None;
        let raw = self.fields[idx].clone();

        if idx == 0 {
            self.view = self.engine.set_required_raw(&raw);
            return;
        }

        let Some(code) = self.selected_region_code() else {
            return;
        };
        if self.strict {
            let value = ramp_allocation::parse_count(&raw) as i64;
            match self.engine.try_set_allocated(&code, value) {
                Ok(view) => self.view = view,
                Err(err) => {
                    self.notice = Some(Notice::from_error(&err));
                    self.sync_fields();
                }
            }
        } else {
            self.view = self.engine.set_allocated_raw(&code, &raw);
            // Ignored edits snap back to what the engine holds
            if !self.engine.region(&code).map(|r| r.active).unwrap_or(false) {
                self.sync_fields();
            }
        }
    }

    pub fn type_char(&mut self, c: char) {
        let Some(idx) = self.allocation_state.selected() else {
            return;
        };
        let field = &mut self.fields[idx];
        if field.as_str() == "0" {
            field.clear();
        }
        if field.len() >= MAX_FIELD_DIGITS {
            return;
        }
        field.push(c);
        self.apply_field(idx);

        // Saturated values snap the text back to what the engine holds
        let overflowed = self.fields[idx]
            .parse::<u64>()
            .map_or(false, |v| v > u32::MAX as u64);
        if overflowed {
            self.sync_fields();
        }
    }

    pub fn backspace(&mut self) {
        let Some(idx) = self.allocation_state.selected() else {
            return;
        };
        self.fields[idx].pop();
        self.apply_field(idx);
    }

    pub fn reset(&mut self) {
        self.view = self.engine.reset();
        self.form.reset();
        self.details_state.select(Some(0));
        self.notice = Some(Notice::new("Form reset successfully!", StatusStyle::Success));
        self.sync_fields();
    }

    // ------------------------------------------------------------------------
    // Ramp details page events
    // ------------------------------------------------------------------------

    pub fn selected_detail(&self) -> Option<DetailRow> {
        let idx = self.details_state.selected()?;
        visible_rows(&self.form).get(idx).copied()
    }

    /// Left/right on the selected select-style field.
    pub fn adjust_detail(&mut self, delta: i32) {
        let Some(row) = self.selected_detail() else {
            return;
        };
        let form = &mut self.form;

        match row {
            DetailRow::StartAvailability => {
                form.set_start_availability(cycle(&AVAILABILITY, form.start_availability(), delta))
            }
            DetailRow::StartDate => form.set_start_date(shift_date(form.start_date(), delta)),
            DetailRow::EndAvailability => {
                form.set_end_availability(cycle(&AVAILABILITY, form.end_availability(), delta))
            }
            DetailRow::EndDate => form.set_end_date(shift_date(form.end_date(), delta)),
            DetailRow::ClientTrainer => {
                form.set_client_trainer(cycle_small(form.client_trainer(), delta))
            }
            DetailRow::InternalTrainer => {
                form.set_internal_trainer(cycle_small(form.internal_trainer(), delta))
            }
            DetailRow::TotalTrainers => {
                let total = (form.total_trainers() as i64 + delta as i64).clamp(0, 100);
                form.set_total_trainers(total as u32)
            }
            DetailRow::TrainingDuration => {
                form.set_training_duration(cycle(&DURATION, form.training_duration(), delta))
            }
            DetailRow::TrainingDurationNumber => form
                .set_training_duration_number(cycle_small(form.training_duration_number(), delta)),
            DetailRow::NestingDuration => {
                form.set_nesting_duration(cycle(&DURATION, form.nesting_duration(), delta))
            }
            DetailRow::NestingDurationNumber => form
                .set_nesting_duration_number(cycle_small(form.nesting_duration_number(), delta)),
            DetailRow::BatchSize => form.set_batch_size(cycle_batch(form.batch_size(), delta)),
            // Typed, not cycled
            DetailRow::SupervisorRatio | DetailRow::QaRatio | DetailRow::TrainerRatio => {}
            DetailRow::Languages => form.set_languages(cycle(&LANGUAGES, form.languages(), delta)),
            DetailRow::VoiceInbound => form.channels.voice_inbound = !form.channels.voice_inbound,
            DetailRow::VoiceOutbound => {
                form.channels.voice_outbound = !form.channels.voice_outbound
            }
            DetailRow::Chat => form.channels.chat = !form.channels.chat,
            DetailRow::Email => form.channels.email = !form.channels.email,
            DetailRow::SocialSms => form.channels.social_sms = !form.channels.social_sms,
            DetailRow::BackOffice => form.channels.back_office = !form.channels.back_office,
            DetailRow::Others => form.channels.others = !form.channels.others,
        }

        // Rows may have disappeared under the cursor
        let len = visible_rows(&self.form).len();
        if let Some(i) = self.details_state.selected() {
            if i >= len {
                self.details_state.select(Some(len - 1));
            }
        }
    }

    fn selected_ratio(&mut self) -> Option<&mut String> {
        let row = self.selected_detail()?;
        let ratios = &mut self.form.ratios;
        match row {
            DetailRow::SupervisorRatio => Some(&mut ratios.supervisor),
            DetailRow::QaRatio => Some(&mut ratios.qa),
            DetailRow::TrainerRatio => Some(&mut ratios.trainer),
            _ => None,
        }
    }

    /// Digits and ':' typed into a ratio row.
    pub fn type_detail_char(&mut self, c: char) {
        if let Some(ratio) = self.selected_ratio() {
            ratio.push(c);
        }
    }

    pub fn detail_backspace(&mut self) {
        if let Some(ratio) = self.selected_ratio() {
            ratio.pop();
        }
    }

    pub fn validate_form(&mut self) {
        let style = if self.form.progress().is_complete() {
            StatusStyle::Success
        } else {
            StatusStyle::Warning
        };
        self.notice = Some(Notice::new(self.form.validation_message(), style));
    }

    fn detail_value(&self, row: DetailRow) -> String {
        let form = &self.form;
        let select = |v: Option<u8>| v.map(|n| n.to_string()).unwrap_or_else(|| "Select".to_string());
        let check = |b: bool| if b { "[x]" } else { "[ ]" }.to_string();

        match row {
            DetailRow::StartAvailability => availability_label(form.start_availability()),
            DetailRow::StartDate => date_label(form.start_date()),
            DetailRow::EndAvailability => availability_label(form.end_availability()),
            DetailRow::EndDate => date_label(form.end_date()),
            DetailRow::ClientTrainer => select(form.client_trainer()),
            DetailRow::InternalTrainer => select(form.internal_trainer()),
            DetailRow::TotalTrainers => form.total_trainers().to_string(),
            DetailRow::TrainingDuration => duration_label(form.training_duration()),
            DetailRow::TrainingDurationNumber => select(form.training_duration_number()),
            DetailRow::NestingDuration => duration_label(form.nesting_duration()),
            DetailRow::NestingDurationNumber => select(form.nesting_duration_number()),
            DetailRow::BatchSize => select(form.batch_size()),
            DetailRow::SupervisorRatio => form.ratios.supervisor.clone(),
            DetailRow::QaRatio => form.ratios.qa.clone(),
            DetailRow::TrainerRatio => form.ratios.trainer.clone(),
            DetailRow::Languages => languages_label(form.languages()),
            DetailRow::VoiceInbound => check(form.channels.voice_inbound),
            DetailRow::VoiceOutbound => check(form.channels.voice_outbound),
            DetailRow::Chat => check(form.channels.chat),
            DetailRow::Email => check(form.channels.email),
            DetailRow::SocialSms => check(form.channels.social_sms),
            DetailRow::BackOffice => check(form.channels.back_office),
            DetailRow::Others => check(form.channels.others),
        }
    }
}

fn availability_label(a: Availability) -> String {
    match a {
        Availability::Unset => "Select",
        Availability::Available => "Available",
        Availability::NotAvailable => "Not Available",
    }
    .to_string()
}

fn duration_label(d: DurationUnit) -> String {
    match d {
        DurationUnit::Unset => "Select",
        DurationUnit::Days => "Days",
        DurationUnit::Weeks => "Weeks",
    }
    .to_string()
}

fn languages_label(l: Languages) -> String {
    match l {
        Languages::Unset => "Select",
        Languages::Single => "Single",
        Languages::Bilingual => "Bilingual",
    }
    .to_string()
}

fn date_label(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "YYYY-MM-DD".to_string())
}

fn style_color(style: StatusStyle) -> Color {
    match style {
        StatusStyle::Neutral => Color::DarkGray,
        StatusStyle::Warning => Color::Yellow,
        StatusStyle::Success => Color::Green,
        StatusStyle::Danger => Color::Red,
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Tab | KeyCode::BackTab => app.next_page(),
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Char('x') => app.reset(),
            _ => match app.current_page {
                Page::Allocation => match key.code {
                    KeyCode::Char(' ') => app.toggle_selected(),
                    KeyCode::Char(c) if c.is_ascii_digit() => app.type_char(c),
                    KeyCode::Backspace => app.backspace(),
                    _ => {}
                },
                Page::RampDetails => match key.code {
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                        app.adjust_detail(1)
                    }
                    KeyCode::Left | KeyCode::Char('h') => app.adjust_detail(-1),
                    KeyCode::Char('v') => app.validate_form(),
                    KeyCode::Char(c) if c.is_ascii_digit() || c == ':' => app.type_detail_char(c),
                    KeyCode::Backspace => app.detail_backspace(),
                    _ => {}
                },
            },
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status banner / progress
            Constraint::Length(3), // Key help
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Allocation => {
            render_allocation(f, chunks[1], app);
            render_banner(f, chunks[2], app);
        }
        Page::RampDetails => {
            render_details(f, chunks[1], app);
            render_progress(f, chunks[2], app);
        }
    }

    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in [Page::RampDetails, Page::Allocation].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!(
            "Allocated: {} / {}",
            app.view.allocated_total, app.view.required_total
        ),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Remaining: {}", app.view.remaining_display()),
        Style::default().fg(style_color(app.view.status.style())),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_allocation(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Country", "Selected", "Headcount"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let unit = app.view.requirement_kind.unit_label();
    let mut rows = vec![Row::new(vec![
        Cell::from(format!("Required {}", unit)).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(""),
        Cell::from(app.fields[0].clone()),
    ])];

    for (i, region) in app.engine.state().regions.iter().enumerate() {
        let (check, color) = if region.active {
            ("[x]", Color::White)
        } else {
            ("[ ]", Color::DarkGray)
        };
        rows.push(Row::new(vec![
            Cell::from(format!("{} ({})", region.name, region.code)).style(Style::default().fg(color)),
            Cell::from(check),
            Cell::from(app.fields[i + 1].clone()).style(Style::default().fg(color)),
        ]));
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(28),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Headcount by Country "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.allocation_state);
}

fn render_banner(f: &mut Frame, area: Rect, app: &App) {
    let color = style_color(app.view.status.style());
    let text = app.view.message().unwrap_or_default();

    let banner = Paragraph::new(Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", app.view.status.as_str())),
    );

    f.render_widget(banner, area);
}

fn render_details(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Field", "Value"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows: Vec<Row> = visible_rows(&app.form)
        .into_iter()
        .map(|row| Row::new(vec![Cell::from(row.label()), Cell::from(app.detail_value(row))]))
        .collect();

    let table = Table::new(rows, [Constraint::Length(28), Constraint::Length(16)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Ramp Details "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.details_state);
}

fn render_progress(f: &mut Frame, area: Rect, app: &App) {
    let progress = app.form.progress();
    let color = match progress.band {
        ProgressBand::Low => Color::Red,
        ProgressBand::Medium => Color::Yellow,
        ProgressBand::High => Color::Green,
    };

    let title = if progress.is_complete() {
        " Progress: all required fields completed ".to_string()
    } else {
        format!(" Progress: {}/{} required ", progress.completed, progress.required)
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(color))
        .percent(progress.percent as u16);

    f.render_widget(gauge, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(notice) = &app.notice {
        status_spans.push(Span::styled(
            format!(" {} ", notice.text),
            Style::default().fg(style_color(notice.style)),
        ));
        status_spans.push(Span::raw(" | "));
    }

    let keys: &[(&str, &str)] = match app.current_page {
        Page::Allocation => &[("Space", " Select"), ("0-9/Bksp", " Edit")],
        Page::RampDetails => &[("←/→", " Change"), ("0-9/:", " Ratio"), ("v", " Validate")],
    };
    for (key, what) in keys {
        status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(*what));
        status_spans.push(Span::raw(" | "));
    }

    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("x", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Reset | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramp_allocation::AllocationStatus;

    fn app() -> App {
        App::new(AllocationEngine::from_codes(&["CAN", "COL"], 100).unwrap(), false)
    }

    fn select(app: &mut App, row: usize) {
        app.allocation_state.select(Some(row));
    }

    #[test]
    fn test_typing_updates_view() {
        let mut app = app();
        select(&mut app, 1);
        app.type_char('6');
        app.type_char('0');
        select(&mut app, 2);
        app.type_char('4');
        app.type_char('0');

        assert_eq!(app.fields, vec!["100", "60", "40"]);
        assert_eq!(app.view.allocated_total, 100);
        assert_eq!(app.view.status, AllocationStatus::Exact);
    }

    #[test]
    fn test_required_edit() {
        let mut app = app();
        select(&mut app, 0);
        app.backspace();
        app.backspace();
        app.backspace();
        assert_eq!(app.fields[0], "");
        assert_eq!(app.view.required_total, 0);

        app.type_char('5');
        assert_eq!(app.view.required_total, 5);
    }

    #[test]
    fn test_toggle_resets_field() {
        let mut app = app();
        select(&mut app, 2);
        app.type_char('5');
        app.type_char('0');
        app.toggle_selected();

        assert_eq!(app.fields[2], "0");
        assert!(!app.engine.region("COL").unwrap().active);

        // Typing into an inactive region changes nothing in the engine
        app.type_char('9');
        assert_eq!(app.view.allocated_total, 0);
        assert_eq!(app.fields[2], "0");
    }

    #[test]
    fn test_strict_mode_reports_inactive_region() {
        let mut app = App::new(AllocationEngine::from_codes(&["CAN", "COL"], 100).unwrap(), true);
        select(&mut app, 1);
        app.toggle_selected();
        app.type_char('7');

        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.text, "region CAN is not active");
        assert_eq!(notice.style, StatusStyle::Warning);
        assert_eq!(app.fields[1], "0");
    }

    #[test]
    fn test_unknown_region_notice_is_danger() {
        let err = AllocationError::UnknownRegion("XYZ".to_string());
        assert_eq!(Notice::from_error(&err).style, StatusStyle::Danger);
    }

    #[test]
    fn test_field_stops_at_engine_limit() {
        let mut app = app();
        select(&mut app, 1);
        for _ in 0..11 {
            app.type_char('9');
        }

        assert_eq!(app.fields[1], u32::MAX.to_string());
        assert_eq!(app.engine.region("CAN").unwrap().allocated, u32::MAX);
        assert_eq!(app.view.allocated_total, u32::MAX as u64);

        select(&mut app, 0);
        for _ in 0..3 {
            app.backspace();
        }
        for _ in 0..12 {
            app.type_char('8');
        }
        assert_eq!(app.fields[0], u32::MAX.to_string());
        assert_eq!(app.view.required_total, u32::MAX as u64);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        app.previous();
        assert_eq!(app.allocation_state.selected(), Some(2));
        app.next();
        assert_eq!(app.allocation_state.selected(), Some(0));
    }

    #[test]
    fn test_details_rows_follow_visibility() {
        let mut app = app();
        app.current_page = Page::RampDetails;
        // 2 availabilities, 3 trainer rows, 3 ratios, languages, 7 channels
        assert_eq!(visible_rows(&app.form).len(), 16);

        // Start availability → Available reveals the date row
        app.adjust_detail(1);
        assert_eq!(app.form.start_availability(), Availability::Available);
        assert_eq!(visible_rows(&app.form)[1], DetailRow::StartDate);

        app.next();
        app.adjust_detail(1);
        assert!(app.form.start_date().is_some());
    }

    #[test]
    fn test_extra_channels_and_ratios() {
        let mut app = app();
        app.current_page = Page::RampDetails;

        let rows = visible_rows(&app.form);
        let back_office = rows.iter().position(|r| *r == DetailRow::BackOffice).unwrap();
        app.details_state.select(Some(back_office));
        app.adjust_detail(1);
        assert!(app.form.channels.back_office);
        assert!(app.form.is_filled(ramp_allocation::FormField::Channels));

        let qa = rows.iter().position(|r| *r == DetailRow::QaRatio).unwrap();
        app.details_state.select(Some(qa));
        app.detail_backspace();
        app.type_detail_char('5');
        assert_eq!(app.form.ratios.qa, "1:5");
        assert_eq!(app.detail_value(DetailRow::QaRatio), "1:5");

        // Typing on a non-ratio row is ignored
        app.details_state.select(Some(0));
        app.type_detail_char('7');
        assert_eq!(app.form.ratios.supervisor, "1:1");

        let languages = rows.iter().position(|r| *r == DetailRow::Languages).unwrap();
        app.details_state.select(Some(languages));
        app.adjust_detail(-1);
        assert_eq!(app.form.languages(), Languages::Bilingual);
    }

    #[test]
    fn test_cycle_helpers() {
        assert_eq!(cycle_small(None, 1), Some(1));
        assert_eq!(cycle_small(Some(10), 1), None);
        assert_eq!(cycle_small(None, -1), Some(10));
        assert_eq!(cycle_batch(None, 1), Some(5));
        assert_eq!(cycle_batch(Some(50), 1), None);
        assert_eq!(cycle(&DURATION, DurationUnit::Weeks, 1), DurationUnit::Unset);
    }

    #[test]
    fn test_reset() {
        let mut app = app();
        select(&mut app, 1);
        app.type_char('3');
        app.form.channels.chat = true;
        app.form.ratios.trainer = "1:8".to_string();
        app.reset();

        assert_eq!(app.fields, vec!["100", "0", "0"]);
        assert_eq!(app.view.status, AllocationStatus::Empty);
        assert_eq!(app.form, RampForm::default());
    }
}
