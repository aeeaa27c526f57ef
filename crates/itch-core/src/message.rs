//! ITCH 5.0 message types.
//!
//! The tag set is closed: every tag the feed may carry has a variant here,
//! and the payload length of each type is a static property of the variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ITCH 5.0 message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    SystemEvent,
    StockDirectory,
    StockTradingAction,
    RegShoRestriction,
    MarketParticipantPosition,
    MwcbDeclineLevel,
    MwcbStatus,
    IpoQuotingPeriodUpdate,
    LuldAuctionCollar,
    OperationalHalt,
    AddOrder,
    AddOrderWithMpid,
    OrderExecuted,
    OrderExecutedWithPrice,
    OrderCancel,
    OrderDelete,
    OrderReplace,
    NonCrossTrade,
    CrossTrade,
    BrokenTrade,
    Noii,
}

impl MessageType {
    /// Every message type, in tag-table order.
    pub const ALL: [MessageType; 21] = [
        Self::SystemEvent,
        Self::StockDirectory,
        Self::StockTradingAction,
        Self::RegShoRestriction,
        Self::MarketParticipantPosition,
        Self::MwcbDeclineLevel,
        Self::MwcbStatus,
        Self::IpoQuotingPeriodUpdate,
        Self::LuldAuctionCollar,
        Self::OperationalHalt,
        Self::AddOrder,
        Self::AddOrderWithMpid,
        Self::OrderExecuted,
        Self::OrderExecutedWithPrice,
        Self::OrderCancel,
        Self::OrderDelete,
        Self::OrderReplace,
        Self::NonCrossTrade,
        Self::CrossTrade,
        Self::BrokenTrade,
        Self::Noii,
    ];

    /// Wire tag byte.
    pub const fn tag(self) -> u8 {
        match self {
            Self::SystemEvent => b'S',
            Self::StockDirectory => b'R',
            Self::StockTradingAction => b'H',
            Self::RegShoRestriction => b'Y',
            Self::MarketParticipantPosition => b'L',
            Self::MwcbDeclineLevel => b'V',
            Self::MwcbStatus => b'W',
            Self::IpoQuotingPeriodUpdate => b'K',
            Self::LuldAuctionCollar => b'J',
            Self::OperationalHalt => b'h',
            Self::AddOrder => b'A',
            Self::AddOrderWithMpid => b'F',
            Self::OrderExecuted => b'E',
            Self::OrderExecutedWithPrice => b'C',
            Self::OrderCancel => b'X',
            Self::OrderDelete => b'D',
            Self::OrderReplace => b'U',
            Self::NonCrossTrade => b'P',
            Self::CrossTrade => b'Q',
            Self::BrokenTrade => b'B',
            Self::Noii => b'I',
        }
    }

    /// Payload length in bytes, excluding the tag byte.
    pub const fn payload_len(self) -> usize {
        match self {
            Self::SystemEvent => 11,
            Self::StockDirectory => 38,
            Self::StockTradingAction => 24,
            Self::RegShoRestriction => 19,
            Self::MarketParticipantPosition => 25,
            Self::MwcbDeclineLevel => 34,
            Self::MwcbStatus => 11,
            Self::IpoQuotingPeriodUpdate => 27,
            Self::LuldAuctionCollar => 34,
            Self::OperationalHalt => 20,
            Self::AddOrder => 35,
            Self::AddOrderWithMpid => 39,
            Self::OrderExecuted => 30,
            Self::OrderExecutedWithPrice => 35,
            Self::OrderCancel => 22,
            Self::OrderDelete => 18,
            Self::OrderReplace => 34,
            Self::NonCrossTrade => 43,
            Self::CrossTrade => 39,
            Self::BrokenTrade => 18,
            Self::Noii => 49,
        }
    }

    /// True for types decoded only far enough to recover the timestamp.
    pub const fn is_timestamp_only(self) -> bool {
        !matches!(
            self,
            Self::SystemEvent
                | Self::AddOrder
                | Self::AddOrderWithMpid
                | Self::OrderExecuted
                | Self::OrderExecutedWithPrice
                | Self::OrderReplace
                | Self::NonCrossTrade
                | Self::BrokenTrade
        )
    }

    /// Short label used for logs and metric labels.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SystemEvent => "system_event",
            Self::StockDirectory => "stock_directory",
            Self::StockTradingAction => "stock_trading_action",
            Self::RegShoRestriction => "reg_sho_restriction",
            Self::MarketParticipantPosition => "market_participant_position",
            Self::MwcbDeclineLevel => "mwcb_decline_level",
            Self::MwcbStatus => "mwcb_status",
            Self::IpoQuotingPeriodUpdate => "ipo_quoting_period_update",
            Self::LuldAuctionCollar => "luld_auction_collar",
            Self::OperationalHalt => "operational_halt",
            Self::AddOrder => "add_order",
            Self::AddOrderWithMpid => "add_order_with_mpid",
            Self::OrderExecuted => "order_executed",
            Self::OrderExecutedWithPrice => "order_executed_with_price",
            Self::OrderCancel => "order_cancel",
            Self::OrderDelete => "order_delete",
            Self::OrderReplace => "order_replace",
            Self::NonCrossTrade => "non_cross_trade",
            Self::CrossTrade => "cross_trade",
            Self::BrokenTrade => "broken_trade",
            Self::Noii => "noii",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.as_str(), self.tag() as char)
    }
}
