//! Static floor-plan data and its layout rules.
//! Room occupancy is mock data; a live feed would replace [`MOCK_ROOMS`].

pub const STAGE_WIDTH: f64 = 800.0;
pub const STAGE_HEIGHT: f64 = 600.0;
pub const STAGE_BACKGROUND: &str = "#f5f5f5";
pub const ROOM_CORNER_RADIUS: f64 = 4.0;
pub const ROOM_STROKE_WIDTH: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Room {
    pub id: &'static str,
    pub rect: Rect,
    pub label: &'static str,
    pub occupant: &'static str,
    pub alert: bool,
}

const fn room(
    id: &'static str,
    x: f64,
    y: f64,
    label: &'static str,
    occupant: &'static str,
    alert: bool,
) -> Room {
    Room {
        id,
        rect: Rect { x, y, width: 100.0, height: 80.0 },
        label,
        occupant,
        alert,
    }
}

pub const MOCK_ROOMS: [Room; 6] = [
    room("R1", 50.0, 50.0, "Room 101", "Patient1", false),
    room("R2", 180.0, 50.0, "Room 102", "Patient2", false),
    room("R3", 310.0, 50.0, "Room 103", "Patient3", true),
    room("R4", 50.0, 160.0, "Room 104", "Patient4", false),
    room("R5", 180.0, 160.0, "Room 105", "Patient5", false),
    room("R6", 310.0, 160.0, "Room 106", "Patient6", false),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomPalette {
    pub fill: &'static str,
    pub stroke: &'static str,
}

pub const DEFAULT_PALETTE: RoomPalette = RoomPalette { fill: "#ffffff", stroke: "#999999" };
pub const ALERT_PALETTE: RoomPalette = RoomPalette { fill: "#ffe5e5", stroke: "#ff6b6b" };

pub fn room_palette(alert: bool) -> RoomPalette {
    if alert { ALERT_PALETTE } else { DEFAULT_PALETTE }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    /// Canvas font shorthand, e.g. `bold 14px sans-serif`.
    pub font: &'static str,
    pub color: &'static str,
}

/// Text drawn inside a room: name, occupant and, when alerting, a warning.
pub fn room_labels(room: &Room) -> Vec<TextLabel> {
    let x = room.rect.x + 5.0;
    let y = room.rect.y;
    let mut labels = vec![
        TextLabel {
            x,
            y: y + 5.0,
            text: room.label.to_string(),
            font: "bold 14px sans-serif",
            color: "#333",
        },
        TextLabel {
            x,
            y: y + 25.0,
            text: format!("Occupant: {}", room.occupant),
            font: "12px sans-serif",
            color: "#555",
        },
    ];
    if room.alert {
        labels.push(TextLabel {
            x,
            y: y + 45.0,
            text: "ALERT!".to_string(),
            font: "bold 12px sans-serif",
            color: "#ff0000",
        });
    }
    labels
}
