use crate::domain::value::{
    AccountReference, Amount, CallbackUrl, Msisdn, ShortCode, TransactionDesc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Daraja STK push transaction type (`TransactionType`).
pub enum TransactionType {
    /// PayBill payment.
    #[default]
    CustomerPayBillOnline,
    /// Buy Goods (Till) payment.
    CustomerBuyGoodsOnline,
}

impl TransactionType {
    /// Wire value as expected by Daraja.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CustomerPayBillOnline => "CustomerPayBillOnline",
            Self::CustomerBuyGoodsOnline => "CustomerBuyGoodsOnline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// What Daraja should do with a C2B payment when the validation URL is
/// unreachable (`ResponseType`).
pub enum ResponseType {
    /// Complete the transaction.
    Completed,
    /// Cancel the transaction.
    Cancelled,
}

impl ResponseType {
    /// Wire value as expected by Daraja.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone)]
/// Caller-facing STK push request.
///
/// Only the payment-specific fields are supplied here. The client injects the
/// signed fields (`BusinessShortCode`, `Password`, `Timestamp`) and the party
/// identifiers at call time:
///
/// - `PartyA` and `PhoneNumber` carry the canonical subscriber number,
/// - `PartyB` defaults to the configured short code unless overridden with
///   [`StkPush::with_party_b`] (Buy Goods Till numbers differ from the
///   PayBill short code).
pub struct StkPush {
    transaction_type: TransactionType,
    amount: Amount,
    phone_number: Msisdn,
    party_b: Option<ShortCode>,
    account_reference: AccountReference,
    transaction_desc: TransactionDesc,
    callback_url: CallbackUrl,
}

impl StkPush {
    /// Create a standard PayBill STK push request.
    pub fn pay_bill(
        amount: Amount,
        phone_number: Msisdn,
        account_reference: AccountReference,
        transaction_desc: TransactionDesc,
        callback_url: CallbackUrl,
    ) -> Self {
        Self {
            transaction_type: TransactionType::CustomerPayBillOnline,
            amount,
            phone_number,
            party_b: None,
            account_reference,
            transaction_desc,
            callback_url,
        }
    }

    /// Create a Buy Goods STK push request.
    pub fn buy_goods(
        amount: Amount,
        phone_number: Msisdn,
        account_reference: AccountReference,
        transaction_desc: TransactionDesc,
        callback_url: CallbackUrl,
    ) -> Self {
        Self {
            transaction_type: TransactionType::CustomerBuyGoodsOnline,
            ..Self::pay_bill(
                amount,
                phone_number,
                account_reference,
                transaction_desc,
                callback_url,
            )
        }
    }

    /// Override the receiving party (`PartyB`).
    ///
    /// Default: the configured business short code.
    pub fn with_party_b(mut self, party_b: ShortCode) -> Self {
        self.party_b = Some(party_b);
        self
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn phone_number(&self) -> &Msisdn {
        &self.phone_number
    }

    pub fn party_b(&self) -> Option<&ShortCode> {
        self.party_b.as_ref()
    }

    pub fn account_reference(&self) -> &AccountReference {
        &self.account_reference
    }

    pub fn transaction_desc(&self) -> &TransactionDesc {
        &self.transaction_desc
    }

    pub fn callback_url(&self) -> &CallbackUrl {
        &self.callback_url
    }
}

#[derive(Debug, Clone)]
/// Caller-facing C2B callback URL registration request.
///
/// The client injects the configured short code; this endpoint is not signed.
pub struct RegisterUrls {
    response_type: ResponseType,
    confirmation_url: CallbackUrl,
    validation_url: CallbackUrl,
}

impl RegisterUrls {
    /// Create a registration request for a confirmation/validation URL pair.
    pub fn new(
        response_type: ResponseType,
        confirmation_url: CallbackUrl,
        validation_url: CallbackUrl,
    ) -> Self {
        Self {
            response_type,
            confirmation_url,
            validation_url,
        }
    }

    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    pub fn confirmation_url(&self) -> &CallbackUrl {
        &self.confirmation_url
    }

    pub fn validation_url(&self) -> &CallbackUrl {
        &self.validation_url
    }
}
