mod dispatch;

pub use dispatch::{
    DisabledDispatchGateway, IDispatchGateway, InMemoryDispatchGateway, SendResult,
    TelegramDispatchGateway,
};
