use std::{sync::Arc, time::Duration};

use iced::{
    theme,
    widget::{button, checkbox, column, container, pick_list, row, text, text_input, Column, Row},
    Alignment, Application, Color, Command, Element, Length, Theme,
};
use log::info;
use shared::data::{ExitRecord, ParkedVehicle, Reply, RevenueSummary, StatusSummary, VehicleType};

use crate::{
    client::Client,
    error::Error,
    form::{EntryForm, ExitForm, RevenueForm},
    grid::{slot_grid, SlotCell},
    notice::{self, Notice, Tone},
};

static VEHICLE_TYPES: [VehicleType; 4] = VehicleType::ALL;
const SLOTS_PER_ROW: usize = 6;

/// The parking desk window. Each action sends exactly one request and shows what came back.
pub struct ParkingDesk {
    client: Arc<Client>,
    entry: EntryForm,
    exit: ExitForm,
    revenue: RevenueForm,
    entry_notice: Option<Notice>,
    exit_notice: Option<Notice>,
    quick_info: Option<Notice>,
    revenue_notice: Option<Notice>,
    grid: Vec<SlotCell>,
}

#[derive(Debug, Clone)]
pub enum Message {
    EntryNumberChanged(String),
    EntryTypeSelected(VehicleType),
    EntryVipToggled(bool),
    ExitNumberChanged(String),
    RevenueDateChanged(String),
    SubmitEntry,
    SubmitExit,
    RequestStatus,
    RequestRevenue,
    EntryDone(String, Result<Reply<ParkedVehicle>, Arc<Error>>),
    ExitDone(Result<Reply<ExitRecord>, Arc<Error>>),
    StatusDone(Result<StatusSummary, Arc<Error>>),
    RevenueDone(Result<Reply<RevenueSummary>, Arc<Error>>),
    /// Fired a moment after a vehicle came or went, to show the new state.
    Refresh,
}

impl ParkingDesk {
    fn with_client(client: Client) -> Self {
        ParkingDesk {
            client: Arc::new(client),
            entry: EntryForm::default(),
            exit: ExitForm::default(),
            revenue: RevenueForm::default(),
            entry_notice: None,
            exit_notice: None,
            quick_info: None,
            revenue_notice: None,
            grid: Vec::new(),
        }
    }

    /// Only an accepted entry or exit changes the lot, so only those are followed by a refresh.
    fn refresh_delay(&self, message: &Message) -> Option<Duration> {
        let settings = self.client.settings();
        match message {
            Message::EntryDone(_, Ok(Reply::Accepted(_))) => Some(settings.entry_refresh),
            Message::ExitDone(Ok(Reply::Accepted(_))) => Some(settings.exit_refresh),
            _ => None,
        }
    }

    fn request_status(&self) -> Command<Message> {
        let client = Arc::clone(&self.client);
        Command::perform(
            async move { client.status().await.map_err(Arc::new) },
            Message::StatusDone,
        )
    }

    fn submit_entry(&mut self) -> Command<Message> {
        let request = self.entry.to_request();
        let number = request.number.clone();
        self.entry_notice = Some(Notice::pending());

        let client = Arc::clone(&self.client);
        Command::perform(
            async move { client.enter(&request).await.map_err(Arc::new) },
            move |outcome| Message::EntryDone(number, outcome),
        )
    }

    fn submit_exit(&mut self) -> Command<Message> {
        let request = self.exit.to_request();
        self.exit_notice = Some(Notice::pending());

        let client = Arc::clone(&self.client);
        Command::perform(
            async move { client.exit(&request).await.map_err(Arc::new) },
            Message::ExitDone,
        )
    }

    fn request_revenue(&mut self) -> Command<Message> {
        let date = match self.revenue.date() {
            Ok(date) => date,
            Err(err) => {
                self.revenue_notice = Some(Notice::danger(err.to_string()));
                return Command::none();
            }
        };
        self.revenue_notice = Some(Notice::pending());

        let client = Arc::clone(&self.client);
        Command::perform(
            async move { client.revenue(date).await.map_err(Arc::new) },
            Message::RevenueDone,
        )
    }
}

fn refresh_after(delay: Duration) -> Command<Message> {
    Command::perform(tokio::time::sleep(delay), |()| Message::Refresh)
}

impl Application for ParkingDesk {
    type Message = Message;
    type Executor = iced::executor::Default;
    type Theme = Theme;
    type Flags = Client;

    fn new(client: Self::Flags) -> (Self, Command<Self::Message>) {
        info!("Parking desk connected to {}", client.settings().server);
        let desk = ParkingDesk::with_client(client);
        let command = desk.request_status();
        (desk, command)
    }

    fn title(&self) -> String {
        "Parking Desk".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        let refresh = self.refresh_delay(&message);
        match message {
            Message::EntryNumberChanged(number) => self.entry.number = number,
            Message::EntryTypeSelected(vtype) => self.entry.vtype = vtype,
            Message::EntryVipToggled(vip) => self.entry.vip = vip,
            Message::ExitNumberChanged(number) => self.exit.number = number,
            Message::RevenueDateChanged(date) => self.revenue.date = date,
            Message::SubmitEntry => return self.submit_entry(),
            Message::SubmitExit => return self.submit_exit(),
            Message::RequestStatus | Message::Refresh => return self.request_status(),
            Message::RequestRevenue => return self.request_revenue(),
            Message::EntryDone(number, outcome) => {
                self.entry_notice = Some(notice::entry(&number, &outcome));
            }
            Message::ExitDone(outcome) => {
                self.exit_notice = Some(notice::exit(&outcome));
            }
            Message::StatusDone(outcome) => {
                if let Ok(status) = &outcome {
                    self.grid = slot_grid(status);
                }
                self.quick_info = Some(notice::status(&outcome));
            }
            Message::RevenueDone(outcome) => {
                self.revenue_notice = Some(notice::revenue(&outcome));
            }
        };

        refresh.map_or_else(Command::none, refresh_after)
    }

    fn view(&self) -> Element<Message> {
        let entry_number = text_input(
            "Vehicle number",
            &self.entry.number,
        )
        .on_input(Message::EntryNumberChanged)
        .on_submit(Message::SubmitEntry);
        let entry_type = pick_list(
            &VEHICLE_TYPES[..],
            Some(self.entry.vtype),
            Message::EntryTypeSelected,
        );
        let entry_vip = checkbox("VIP", self.entry.vip, Message::EntryVipToggled);
        let entry_options = row![entry_type, entry_vip]
            .spacing(10)
            .align_items(Alignment::Center);
        let entry = column![
            text("Vehicle entry").size(24),
            entry_number,
            entry_options,
            button("Park vehicle").on_press(Message::SubmitEntry),
            notice_view(self.entry_notice.as_ref()),
        ]
        .spacing(8)
        .width(Length::Fill);

        let exit_number = text_input(
            "Vehicle number",
            &self.exit.number,
        )
        .on_input(Message::ExitNumberChanged)
        .on_submit(Message::SubmitExit);
        let exit = column![
            text("Vehicle exit").size(24),
            exit_number,
            button("Release vehicle").on_press(Message::SubmitExit),
            notice_view(self.exit_notice.as_ref()),
        ]
        .spacing(8)
        .width(Length::Fill);

        let forms = row![entry, exit].spacing(20);

        let revenue_date = text_input(
            "Date (YYYY-MM-DD), blank for today",
            &self.revenue.date,
        )
        .on_input(Message::RevenueDateChanged)
        .on_submit(Message::RequestRevenue)
        .width(Length::Fixed(280.0));
        let actions = row![
            button("Status").on_press(Message::RequestStatus),
            revenue_date,
            button("Revenue").on_press(Message::RequestRevenue),
        ]
        .spacing(10)
        .align_items(Alignment::Center);

        column![
            forms,
            actions,
            notice_view(self.quick_info.as_ref()),
            notice_view(self.revenue_notice.as_ref()),
            grid_view(&self.grid),
        ]
        .padding(10)
        .spacing(15)
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Pending => Color::from_rgb(0.7, 0.7, 0.7),
        Tone::Success => Color::from_rgb(0.3, 0.8, 0.4),
        Tone::Danger => Color::from_rgb(0.9, 0.3, 0.3),
        Tone::Info => Color::from_rgb(0.4, 0.7, 0.9),
    }
}

fn notice_view(notice: Option<&Notice>) -> Element<'_, Message> {
    let Some(notice) = notice else {
        return text("").into();
    };
    text(notice.text.as_str())
        .style(theme::Text::Color(tone_color(notice.tone)))
        .into()
}

fn grid_view(cells: &[SlotCell]) -> Element<'_, Message> {
    let rows: Vec<Element<'_, Message>> = cells
        .chunks(SLOTS_PER_ROW)
        .map(|chunk| {
            let cells: Vec<Element<'_, Message>> = chunk.iter().map(cell_view).collect();
            Row::with_children(cells).spacing(6).into()
        })
        .collect();

    Column::with_children(rows).spacing(6).into()
}

fn cell_view(cell: &SlotCell) -> Element<'_, Message> {
    let color = match (&cell.occupant, cell.vip) {
        (Some(_), _) => tone_color(Tone::Danger),
        (None, true) => Color::from_rgb(0.9, 0.75, 0.2),
        (None, false) => tone_color(Tone::Success),
    };
    container(text(cell.label()).style(theme::Text::Color(color)))
        .padding(6)
        .width(Length::Fixed(130.0))
        .into()
}
