use once_cell::sync::Lazy;

use crate::database::ColumnKind;
use crate::query::ResourceSchema;

/// CustomerMaster, paged by customer code
pub static CUSTOMERS: Lazy<ResourceSchema> = Lazy::new(|| {
    ResourceSchema::builder("customers", "CustomerMaster")
        .text("CustomerCode")
        .integer("Category")
        .text("CustomerDesc")
        .series("BalanceThis", 13, ColumnKind::Decimal)
        .series("BalanceLast", 13, ColumnKind::Decimal)
        .series("SalesThis", 13, ColumnKind::Decimal)
        .series("SalesLast", 13, ColumnKind::Decimal)
        .series("PostAddress", 5, ColumnKind::Text)
        .integer("TaxCode")
        .text("ExemptRef")
        .integers(&["SettlementTerms", "PaymentTerms"])
        .decimals(&["Discount", "CreditLimit"])
        .integers(&["InterestAfter", "PriceRegime"])
        .date("LastCrDate")
        .decimal("LastCrAmount")
        .integer("Blocked")
        .boolean("OpenItem")
        .integer("OverRideTax")
        .boolean("MonthOrDay")
        .text("CountryCode")
        .integer("CurrencyCode")
        .series("CurrBalanceThis", 13, ColumnKind::Decimal)
        .series("CurrBalanceLast", 13, ColumnKind::Decimal)
        .series("UserDefined", 5, ColumnKind::Text)
        .series("Ageing", 5, ColumnKind::Decimal)
        .texts(&["InterestPer", "Freight01", "Ship"])
        .datetime("UpdatedOn")
        .boolean("CashAccount")
        .date("CreateDate")
        .texts(&["CustName", "CustSurname", "CustID"])
        .text("BankName")
        .integer("BankType")
        .texts(&["BankBranch", "BankAccNumber"])
        .integer("BankAccRelation")
        .texts(&["GUID", "ThirdPartyID", "PassportNumber"])
        .key(&["CustomerCode"])
        .build()
});
