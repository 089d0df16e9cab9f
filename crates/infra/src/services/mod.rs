mod mailer;

pub use mailer::{
    IDeliveryGateway, InMemoryDeliveryGateway, LogDeliveryGateway, ResendGateway, SentEmail,
};
