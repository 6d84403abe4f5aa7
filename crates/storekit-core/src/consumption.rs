//! Consumption information for refund requests.
//!
//! When a customer asks the vendor for a refund on a consumable purchase, the
//! vendor may ask the app's server for a `ConsumptionRequest` describing how
//! the purchase was used. Sending it requires the customer's consent.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

vendor_enum! {
    /// Age of the customer's account.
    AccountTenure {
        /// Not declared.
        Undeclared = 0 => "UNDECLARED",
        /// Between 0 and 3 days.
        Days0To3 = 1 => "DAYS_0_3",
        /// Between 3 and 10 days.
        Days3To10 = 2 => "DAYS_3_10",
        /// Between 10 and 30 days.
        Days10To30 = 3 => "DAYS_10_30",
        /// Between 30 and 90 days.
        Days30To90 = 4 => "DAYS_30_90",
        /// Between 90 and 180 days.
        Days90To180 = 5 => "DAYS_90_180",
        /// Between 180 and 365 days.
        Days180To365 = 6 => "DAYS_180_365",
        /// Over 365 days.
        DaysOver365 = 7 => "DAYS_OVER_365",
    }
}

vendor_enum! {
    /// Extent to which the customer consumed the in-app purchase.
    ConsumptionStatus {
        /// Not declared.
        Undeclared = 0 => "UNDECLARED",
        /// Not consumed.
        NotConsumed = 1 => "NOT_CONSUMED",
        /// Partially consumed.
        PartiallyConsumed = 2 => "PARTIALLY_CONSUMED",
        /// Fully consumed.
        FullyConsumed = 3 => "FULLY_CONSUMED",
    }
}

vendor_enum! {
    /// Whether the app delivered the purchase and it works.
    DeliveryStatus {
        /// Delivered and working.
        DeliveredWorking = 0 => "DELIVERED_WORKING",
        /// Not delivered because of a quality issue.
        NotDeliveredQualityIssue = 1 => "NOT_DELIVERED_QUALITY_ISSUE",
        /// The wrong item was delivered.
        DeliveredWrongItem = 2 => "DELIVERED_WRONG_ITEM",
        /// Not delivered because of a server outage.
        NotDeliveredServerOutage = 3 => "NOT_DELIVERED_SERVER_OUTAGE",
        /// Not delivered because of an in-game currency change.
        NotDeliveredCurrencyChange = 4 => "NOT_DELIVERED_CURRENCY_CHANGE",
        /// Not delivered for other reasons.
        NotDeliveredOther = 5 => "NOT_DELIVERED_OTHER",
    }
}

vendor_enum! {
    /// Platform on which the customer consumed the purchase.
    Platform {
        /// Not declared.
        Undeclared = 0 => "UNDECLARED",
        /// An Apple platform.
        Apple = 1 => "APPLE",
        /// A non-Apple platform.
        NonApple = 2 => "NON_APPLE",
    }
}

vendor_enum! {
    /// Amount of time the customer used the app.
    PlayTime {
        /// Not declared.
        Undeclared = 0 => "UNDECLARED",
        /// 0 to 5 minutes.
        Minutes0To5 = 1 => "MINUTES_0_5",
        /// 5 to 60 minutes.
        Minutes5To60 = 2 => "MINUTES_5_60",
        /// 1 to 6 hours.
        Hours1To6 = 3 => "HOURS_1_6",
        /// 6 to 24 hours.
        Hours6To24 = 4 => "HOURS_6_24",
        /// 1 to 4 days.
        Days1To4 = 5 => "DAYS_1_4",
        /// 4 to 16 days.
        Days4To16 = 6 => "DAYS_4_16",
        /// Over 16 days.
        DaysOver16 = 7 => "DAYS_OVER_16",
    }
}

vendor_enum! {
    /// Total amount, in USD, across all platforms.
    LifetimeDollars {
        /// Not declared.
        Undeclared = 0 => "UNDECLARED",
        /// Zero dollars.
        Usd0 = 1 => "USD_0",
        /// $0.01 to $49.99.
        Usd0_01To49_99 = 2 => "USD_0_01_49_99",
        /// $50 to $99.99.
        Usd50To99_99 = 3 => "USD_50_99_99",
        /// $100 to $499.99.
        Usd100To499_99 = 4 => "USD_100_499_99",
        /// $500 to $999.99.
        Usd500To999_99 = 5 => "USD_500_999_99",
        /// $1000 to $1999.99.
        Usd1000To1999_99 = 6 => "USD_1000_1999_99",
        /// Over $2000.
        UsdOver2000 = 7 => "USD_OVER_2000",
    }
}

vendor_enum! {
    /// Status of the customer's account in the app.
    UserStatus {
        /// Not declared.
        Undeclared = 0 => "UNDECLARED",
        /// Active.
        Active = 1 => "ACTIVE",
        /// Suspended.
        Suspended = 2 => "SUSPENDED",
        /// Terminated.
        Terminated = 3 => "TERMINATED",
        /// Limited access.
        LimitedAccess = 4 => "LIMITED_ACCESS",
    }
}

vendor_enum! {
    /// The app's preferred outcome for the refund request.
    RefundPreference {
        /// Not declared.
        Undeclared = 0 => "UNDECLARED",
        /// Grant the refund.
        Grant = 1 => "GRANT",
        /// Decline the refund.
        Decline = 2 => "DECLINE",
        /// No preference.
        NoPreference = 3 => "NO_PREFERENCE",
    }
}

/// Consumption information sent in response to a refund request.
///
/// `customer_consented` starts out `false`; the client refuses to send a
/// request until consent has been recorded with
/// [`with_customer_consent`](Self::with_customer_consent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRequest {
    /// Whether the customer consented to sharing consumption data.
    pub customer_consented: bool,

    /// Extent to which the customer consumed the purchase.
    pub consumption_status: ConsumptionStatus,

    /// Platform on which the customer consumed the purchase.
    pub platform: Platform,

    /// Whether a free sample or trial was provided before purchase.
    pub sample_content_provided: bool,

    /// Whether the app delivered the purchase.
    pub delivery_status: DeliveryStatus,

    /// UUID of the in-app user account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_account_token: Option<Uuid>,

    /// Age of the customer's account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_tenure: Option<AccountTenure>,

    /// Amount of time the customer used the app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_time: Option<PlayTime>,

    /// Total refunds the customer received, across platforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime_dollars_refunded: Option<LifetimeDollars>,

    /// Total purchases the customer made, across platforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime_dollars_purchased: Option<LifetimeDollars>,

    /// Status of the customer's account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_status: Option<UserStatus>,

    /// Preferred outcome of the refund request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_preference: Option<RefundPreference>,
}

impl ConsumptionRequest {
    /// Create a request with the mandatory fields and no consent recorded.
    #[must_use]
    pub fn new(
        consumption_status: ConsumptionStatus,
        platform: Platform,
        sample_content_provided: bool,
        delivery_status: DeliveryStatus,
    ) -> Self {
        Self {
            customer_consented: false,
            consumption_status,
            platform,
            sample_content_provided,
            delivery_status,
            app_account_token: None,
            account_tenure: None,
            play_time: None,
            lifetime_dollars_refunded: None,
            lifetime_dollars_purchased: None,
            user_status: None,
            refund_preference: None,
        }
    }

    /// Record whether the customer consented.
    #[must_use]
    pub fn with_customer_consent(mut self, consented: bool) -> Self {
        self.customer_consented = consented;
        self
    }

    /// Set the in-app account token.
    #[must_use]
    pub fn with_app_account_token(mut self, token: Uuid) -> Self {
        self.app_account_token = Some(token);
        self
    }

    /// Set the account tenure.
    #[must_use]
    pub fn with_account_tenure(mut self, tenure: AccountTenure) -> Self {
        self.account_tenure = Some(tenure);
        self
    }

    /// Set the play time.
    #[must_use]
    pub fn with_play_time(mut self, play_time: PlayTime) -> Self {
        self.play_time = Some(play_time);
        self
    }

    /// Set the lifetime refund and purchase totals.
    #[must_use]
    pub fn with_lifetime_dollars(
        mut self,
        refunded: LifetimeDollars,
        purchased: LifetimeDollars,
    ) -> Self {
        self.lifetime_dollars_refunded = Some(refunded);
        self.lifetime_dollars_purchased = Some(purchased);
        self
    }

    /// Set the user status.
    #[must_use]
    pub fn with_user_status(mut self, status: UserStatus) -> Self {
        self.user_status = Some(status);
        self
    }

    /// Set the refund preference.
    #[must_use]
    pub fn with_refund_preference(mut self, preference: RefundPreference) -> Self {
        self.refund_preference = Some(preference);
        self
    }
}
