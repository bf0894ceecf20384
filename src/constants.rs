//! Constants used throughout the application
//!
//! This module centralizes user-facing Spanish text, endpoint paths and UI
//! constant values so screens and workflows stay consistent.

// Application
pub const APP_NAME: &str = "NovaBites";
pub const DEFAULT_API_BASE_URL: &str = "https://novabites-production.up.railway.app/";
pub const API_BASE_URL_ENV: &str = "NOVABITES_API_BASE_URL";
pub const DEFAULT_APP_URL: &str = "https://novabites.app";

// Endpoints
pub const EP_LOGIN: &str = "/api/auth/login";
pub const EP_PASSWORD_RESET_REQUEST: &str = "/api/auth/request-password-reset";
pub const EP_PASSWORD_RESET: &str = "/api/auth/reset-password";
pub const EP_USER: &str = "/api/user";
pub const EP_STORE: &str = "/api/store";
pub const EP_PRODUCT: &str = "/api/product";
pub const EP_CATEGORY: &str = "/api/category-product";
pub const EP_STORE_PRODUCT_BY_STORE: &str = "/api/store-product/store";
pub const EP_ORDER: &str = "/api/order";
pub const EP_CUSTOM_ORDER: &str = "/api/custom-order";
pub const EP_BILL_ORDER: &str = "/api/bill/order";
pub const EP_BILL_CUSTOM_ORDER: &str = "/api/bill/custom-order";
pub const EP_BILL_GENERATE: &str = "/api/bill/generate";
pub const EP_STORE_REQUEST: &str = "/api/store-request";
pub const EP_STORE_REQUEST_BY_STORE: &str = "/api/store-request/store";
pub const EP_DAILY_EXPENSE: &str = "/api/daily-expense";
pub const EP_CASH_CLOSING: &str = "/api/cash-closing";
pub const EP_CASH_CLOSING_COUNT: &str = "/api/cash-closing/count";
pub const EP_CASH_CLOSING_LAST: &str = "/api/cash-closing/last-of-day";

// Fetch errors
pub const ERROR_SESSION_EXPIRED: &str = "Sesión expirada. Por favor, inicia sesión nuevamente.";
pub const ERROR_UNKNOWN_REQUEST: &str = "Error desconocido al realizar la solicitud";
pub const ERROR_UNKNOWN_LOGIN: &str = "Error desconocido al iniciar sesión";

// Auth
pub const SUCCESS_LOGIN: &str = "Inicio de Sesión exitoso!";
pub const SUCCESS_LOGIN_DESC: &str = "Bienvenido de nuevo!";
pub const ERROR_LOGIN: &str = "Error al iniciar sesión. Revisa tus credenciales.";
pub const ERROR_LOGIN_DESC: &str = "Inténtalo de nuevo.";
pub const ERROR_LOGIN_FIELDS: &str = "Usuario y contraseña son requeridos";
pub const ERROR_EMAIL_REQUIRED: &str = "El correo electrónico es requerido";
pub const ERROR_EMAIL_REQUIRED_DESC: &str = "Por favor ingresa tu correo.";
pub const SUCCESS_EMAIL_SENT: &str = "¡Correo enviado!";
pub const SUCCESS_EMAIL_SENT_DESC: &str = "Revisa tu bandeja de entrada para restablecer tu contraseña.";
pub const ERROR_EMAIL_SEND: &str = "Error al enviar el correo";
pub const ERROR_TOKEN_INVALID: &str = "Token inválido";
pub const ERROR_TOKEN_INVALID_DESC: &str = "El enlace de recuperación no es válido.";
pub const ERROR_ALL_FIELDS: &str = "Todos los campos son requeridos";
pub const ERROR_ALL_FIELDS_DESC: &str = "Por favor completa todos los campos.";
pub const ERROR_PASSWORD_SHORT: &str = "Contraseña muy corta";
pub const ERROR_PASSWORD_SHORT_DESC: &str = "La contraseña debe tener al menos 6 caracteres.";
pub const ERROR_PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden";
pub const ERROR_PASSWORD_MISMATCH_DESC: &str = "Por favor verifica que ambas contraseñas sean iguales.";
pub const SUCCESS_PASSWORD_RESET: &str = "Contraseña restablecida exitosamente!";
pub const SUCCESS_PASSWORD_RESET_DESC: &str = "Ya puedes iniciar sesión con tu nueva contraseña.";
pub const ERROR_PASSWORD_RESET: &str = "Error al restablecer contraseña";
pub const MIN_PASSWORD_LEN: usize = 6;

// Sales
pub const ERROR_NO_STOCK: &str = "Producto sin stock";
pub const ERROR_NO_STOCK_DESC: &str = "Este producto no tiene stock disponible.";
pub const ERROR_LOW_STOCK: &str = "Stock insuficiente";
pub const ERROR_PAYMENT_METHOD: &str = "Método de pago requerido";
pub const ERROR_PAYMENT_METHOD_DESC: &str = "Debes seleccionar un método de pago.";
pub const ERROR_AMOUNT_REQUIRED: &str = "Monto recibido requerido";
pub const ERROR_AMOUNT_REQUIRED_DESC: &str = "Debes ingresar el monto recibido en efectivo.";
pub const ERROR_AMOUNT_LOW: &str = "Monto insuficiente";
pub const ERROR_AMOUNT_LOW_DESC: &str = "El monto recibido debe ser mayor o igual al total.";
pub const ERROR_TRANSFER_OPTION: &str = "Opción de transferencia requerida";
pub const ERROR_TRANSFER_OPTION_DESC: &str = "Debes seleccionar una opción de transferencia.";
pub const ERROR_EMPTY_CART: &str = "Carrito vacío";
pub const ERROR_EMPTY_CART_DESC: &str = "Agrega al menos un producto antes de pagar.";
pub const SUCCESS_ORDER_CREATED: &str = "Orden creada correctamente";
pub const SUCCESS_ORDER_CREATED_DESC: &str = "La orden ha sido creada exitosamente.";
pub const ERROR_ORDER_CREATE: &str = "Error al crear la orden";
pub const PAYMENT_CASH: &str = "Efectivo";
pub const PAYMENT_TRANSFER: &str = "Transferencia";
pub const PAYMENT_CARD: &str = "Debito/Crédito";
pub const SUBCATEGORY_OTHERS_ID: &str = "others";
pub const SUBCATEGORY_OTHERS_NAME: &str = "Otros";

// Custom orders
pub const ERROR_CLIENT_NAME: &str = "Nombre del cliente requerido";
pub const ERROR_CLIENT_NAME_DESC: &str = "El nombre del cliente es obligatorio.";
pub const ERROR_CLIENT_PHONE: &str = "Teléfono del cliente requerido";
pub const ERROR_CLIENT_PHONE_DESC: &str = "El teléfono del cliente es obligatorio.";
pub const ERROR_EMPTY_ORDER: &str = "Pedido vacío";
pub const ERROR_EMPTY_ORDER_DESC: &str =
    "Debe agregar al menos un producto o una torta personalizada al pedido.";
pub const ERROR_CAKE_INCOMPLETE: &str = "Torta incompleta";
pub const SUCCESS_CUSTOM_ORDER_CANCELED: &str = "Pedido cancelado correctamente";
pub const SUCCESS_CUSTOM_ORDER_COMPLETED: &str = "Pedido completado correctamente";
pub const SUCCESS_CUSTOM_ORDER_CREATED: &str = "Nuevo pedido creado correctamente";
pub const ERROR_CUSTOM_ORDER_CANCEL: &str = "Error al cancelar el pedido";
pub const ERROR_CUSTOM_ORDER_COMPLETE: &str = "Error al completar el pedido";
pub const ERROR_CUSTOM_ORDER_SAVE: &str = "Error al guardar el nuevo pedido";
pub const UNNAMED_CLIENT: &str = "Cliente sin nombre";

// Bills
pub const ERROR_BILL_NOT_FOUND: &str = "No se encontró la factura";
pub const ERROR_BILL_NOT_FOUND_DESC: &str = "No se pudo cargar la información de la factura.";
pub const SUCCESS_PDF: &str = "PDF generado exitosamente";
pub const ERROR_PDF: &str = "Error al generar PDF";
pub const ERROR_PDF_DESC: &str = "No se pudo generar el archivo PDF.";

// Inventory / requests
pub const ERROR_REQUEST_INCOMPLETE: &str = "Debes rellenar todos los campos de la solicitud";
pub const ERROR_RETURN_INCOMPLETE: &str = "Debes rellenar todos los campos de la devolución";
pub const ERROR_RELOCATION_INCOMPLETE: &str = "Debes rellenar todos los campos de la reubicación";
pub const ERROR_INCOMPLETE_DESC: &str = "Asegúrate de que la solicitud está completa antes de enviarla.";
pub const ERROR_RETURN_INCOMPLETE_DESC: &str = "Asegúrate de que la devolución está completa antes de enviarla.";
pub const ERROR_RELOCATION_INCOMPLETE_DESC: &str =
    "Asegúrate de que los datos de la reubicación estén completos antes de enviarla.";
pub const ERROR_TARGET_STORE: &str = "Debes seleccionar una tienda destino";
pub const ERROR_TARGET_STORE_DESC: &str = "Selecciona la tienda a la que deseas reubicar los productos.";
pub const SUCCESS_REQUEST_CREATED: &str = "Pedido a tienda creado correctamente";
pub const SUCCESS_RETURN_CREATED: &str = "Devolución a tienda creada correctamente";
pub const SUCCESS_RELOCATION_CREATED: &str = "Reubicación a tienda creada correctamente";
pub const SUCCESS_REQUEST_CREATED_DESC: &str = "El pedido ha sido creada con éxito.";
pub const SUCCESS_RETURN_CREATED_DESC: &str = "La devolución ha sido creada con éxito.";
pub const SUCCESS_RELOCATION_CREATED_DESC: &str = "La reubicación ha sido creada con éxito.";
pub const ERROR_REQUEST_CREATE: &str = "Error al crear el pedido";
pub const ERROR_RETURN_CREATE: &str = "Error al crear la devolución";
pub const ERROR_RELOCATION_CREATE: &str = "Error al crear la reubicación";
pub const ERROR_REQUEST_NOT_FOUND: &str = "No se encontró la solicitud";
pub const UNKNOWN_STORE: &str = "Tienda no especificada";
pub const UNKNOWN_USER: &str = "Usuario desconocido";
pub const UNKNOWN_PRODUCT: &str = "Producto desconocido";
pub const UNKNOWN_PRODUCT_ID: &str = "unknown";

// Cash closing
pub const ERROR_CLOSING_NOTE: &str = "Descripción requerida";
pub const ERROR_CLOSING_NOTE_DESC: &str = "Debes agregar una descripción del cierre de caja";
pub const ERROR_CLOSING_REQUEST: &str = "Solicitud incompleta";
pub const ERROR_CLOSING_REQUEST_DESC: &str = "Debes completar todos los campos de la solicitud de productos";
pub const ERROR_CLOSING_EXPENSES: &str = "Gastos incompletos";
pub const ERROR_CLOSING_EXPENSES_DESC: &str = "Debes completar todos los campos de los gastos pendientes";
pub const ERROR_CENTRAL_STORE: &str = "No se encontró la tienda central";
pub const ERROR_REPLENISHMENT: &str = "Error al crear la solicitud de reposición";
pub const SUCCESS_CLOSING: &str = "Cierre de caja realizado exitosamente";
pub const ERROR_CLOSING: &str = "Error al procesar cierre";
pub const ERROR_CLOSING_DESC: &str = "No se pudo completar el cierre de caja";
pub const ERROR_CLOSING_UNAVAILABLE: &str = "Cierre no disponible";
pub const ERROR_CLOSING_UNAVAILABLE_DESC: &str = "Solo se puede cerrar caja el día de hoy y con ventas registradas.";
pub const ERROR_REPORT_LOAD: &str = "Error al cargar los datos";
pub const ERROR_EXPENSE_NOT_ALLOWED: &str = "No permitido";
pub const ERROR_EXPENSE_ADD_DESC: &str = "Solo puedes agregar gastos al día actual";
pub const ERROR_EXPENSE_DELETE_DESC: &str = "Solo puedes eliminar gastos del día actual";
pub const SUCCESS_EXPENSE_DELETED: &str = "Gasto eliminado";
pub const SUCCESS_EXPENSE_DELETED_DESC: &str = "El gasto se eliminó correctamente";
pub const ERROR_EXPENSE_DELETE: &str = "Error al eliminar";
pub const ERROR_EXPENSE_DELETE_FAILED_DESC: &str = "No se pudo eliminar el gasto";

// Profile
pub const INFO_PASSWORD_CHANGE: &str = "Solicitud de cambio de contraseña";
pub const INFO_PASSWORD_CHANGE_DESC: &str =
    "Se ha enviado una solicitud al administrador para cambiar tu contraseña.";
pub const NOT_AVAILABLE: &str = "N/A";

// Generic
pub const ERROR_RETRY_LATER: &str = "Por favor, inténtalo de nuevo más tarde.";
pub const CONFIG_GENERATED: &str = "Archivo de configuración generado";
pub const DIALOG_TITLE_LOGS: &str = "Registros - 'Esc' o 'G' para cerrar";

// Table labels
pub const PAGE_LABEL_SHOWING: &str = "Mostrando";
pub const PAGE_LABEL_OF: &str = "de";
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

// UI layout
/// Width of the navigation column on the dashboard
pub const MENU_WIDTH: u16 = 28;
/// Maximum number of toasts stacked at once
pub const MAX_VISIBLE_TOASTS: usize = 4;
/// Toast width in columns
pub const TOAST_WIDTH: u16 = 48;
