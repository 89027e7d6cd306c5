pub mod chart_card;
pub mod chat_area;
pub mod header;
pub mod input_bar;
pub mod logo;
pub mod markdown;
pub mod message_row;
pub mod typing_indicator;
