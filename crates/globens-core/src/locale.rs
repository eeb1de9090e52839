//! Supported locales and the fixed messages the normalizer emits.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Interface language, also sent as `Accept-Language`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    /// Uzbek.
    #[default]
    Uz,
    /// Russian.
    Ru,
    /// English.
    En,
}

impl Locale {
    /// All supported locales, default first.
    pub const ALL: [Self; 3] = [Self::Uz, Self::Ru, Self::En];

    /// Language tag as sent over the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Fixed messages used when the backend did not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    NotAuthenticated,
    SessionExpired,
    RefreshUnavailable,
    NoConnection,
    ServerTimeout,
    InvalidData,
    NotFound,
    Cancelled,
    RequestFailed,
}

impl Message {
    /// Text of this message in the given locale.
    #[must_use]
    pub const fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::NotAuthenticated, Locale::Uz) => "Siz tizimga kirmagansiz",
            (Self::NotAuthenticated, Locale::Ru) => "Вы не вошли в систему",
            (Self::NotAuthenticated, Locale::En) => "You are not logged in",

            (Self::SessionExpired, Locale::Uz) => {
                "Sizning sessiyangiz tugagan. Iltimos, qaytadan tizimga kiring."
            }
            (Self::SessionExpired, Locale::Ru) => {
                "Ваша сессия истекла. Пожалуйста, войдите снова."
            }
            (Self::SessionExpired, Locale::En) => {
                "Your session has expired. Please log in again."
            }

            (Self::RefreshUnavailable, Locale::Uz) => {
                "Sessiyani yangilab bo'lmaydi. Iltimos, qaytadan tizimga kiring."
            }
            (Self::RefreshUnavailable, Locale::Ru) => {
                "Не удалось обновить сессию. Пожалуйста, войдите снова."
            }
            (Self::RefreshUnavailable, Locale::En) => {
                "The session cannot be renewed. Please log in again."
            }

            (Self::NoConnection, Locale::Uz) => {
                "Internet aloqasi yo'q. Iltimos, internet aloqasini tekshiring."
            }
            (Self::NoConnection, Locale::Ru) => {
                "Нет подключения к интернету. Пожалуйста, проверьте соединение."
            }
            (Self::NoConnection, Locale::En) => {
                "No internet connection. Please check your connection."
            }

            (Self::ServerTimeout, Locale::Uz) => {
                "Server javob bermayapti. Iltimos, keyinroq urinib ko'ring."
            }
            (Self::ServerTimeout, Locale::Ru) => {
                "Сервер не отвечает. Пожалуйста, попробуйте позже."
            }
            (Self::ServerTimeout, Locale::En) => {
                "The server is not responding. Please try again later."
            }

            (Self::InvalidData, Locale::Uz) => "Ma'lumotlar noto'g'ri:",
            (Self::InvalidData, Locale::Ru) => "Неверные данные:",
            (Self::InvalidData, Locale::En) => "Invalid data:",

            (Self::NotFound, Locale::Uz) => "Ma'lumot topilmadi",
            (Self::NotFound, Locale::Ru) => "Данные не найдены",
            (Self::NotFound, Locale::En) => "Not found",

            (Self::Cancelled, Locale::Uz) => "So'rov bekor qilindi",
            (Self::Cancelled, Locale::Ru) => "Запрос отменён",
            (Self::Cancelled, Locale::En) => "The request was cancelled",

            (Self::RequestFailed, Locale::Uz) => "So'rovni bajarishda xatolik yuz berdi",
            (Self::RequestFailed, Locale::Ru) => "Произошла ошибка при выполнении запроса",
            (Self::RequestFailed, Locale::En) => "The request failed",
        }
    }
}
